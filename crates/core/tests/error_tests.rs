// ═══════════════════════════════════════════════════════════════════
// Error Tests — CoreError variants, Display formatting, From impls
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;
use index_benchmark_core::errors::CoreError;

fn make_date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ── Display formatting ──────────────────────────────────────────────

mod display {
    use super::*;

    #[test]
    fn empty_cash_flow_series() {
        let err = CoreError::EmptyCashFlowSeries;
        assert_eq!(
            err.to_string(),
            "Cash-flow series must contain at least one entry"
        );
    }

    #[test]
    fn invalid_rate() {
        let err = CoreError::InvalidRate(-1.5);
        assert_eq!(
            err.to_string(),
            "Discount rate -1.5 is outside the model domain (must be greater than -1)"
        );
    }

    #[test]
    fn validation_error() {
        let err = CoreError::ValidationError("bad input".into());
        assert_eq!(err.to_string(), "Validation failed: bad input");
    }

    #[test]
    fn validation_error_empty_message() {
        let err = CoreError::ValidationError(String::new());
        assert_eq!(err.to_string(), "Validation failed: ");
    }

    #[test]
    fn price_unavailable() {
        let err = CoreError::PriceUnavailable {
            symbol: "^GSPC".into(),
            date: make_date(2020, 1, 1),
        };
        assert_eq!(
            err.to_string(),
            "No ^GSPC price available on or before 2020-01-01"
        );
    }

    #[test]
    fn api_error() {
        let err = CoreError::Api {
            provider: "Stooq".into(),
            message: "rate limited".into(),
        };
        assert_eq!(err.to_string(), "Provider error (Stooq): rate limited");
    }

    #[test]
    fn network_error() {
        let err = CoreError::Network("connection refused".into());
        assert_eq!(err.to_string(), "Network error: connection refused");
    }

    #[test]
    fn ingest_error() {
        let err = CoreError::Ingest("row 3 mangled".into());
        assert_eq!(err.to_string(), "Trade history parse error: row 3 mangled");
    }

    #[test]
    fn serialization_error() {
        let err = CoreError::Serialization("oops".into());
        assert_eq!(err.to_string(), "Serialization error: oops");
    }
}

// ── From impls ──────────────────────────────────────────────────────

mod conversions {
    use super::*;

    #[test]
    fn from_serde_json() {
        let json_err = serde_json::from_str::<Vec<f64>>("not json").unwrap_err();
        let core: CoreError = json_err.into();
        assert!(matches!(core, CoreError::Serialization(_)));
    }

    #[test]
    fn from_csv() {
        // Unequal field counts trip the strict reader
        let csv_err = csv::Reader::from_reader("a,b\n1,2,3\n".as_bytes())
            .records()
            .next()
            .unwrap()
            .unwrap_err();
        let core: CoreError = csv_err.into();
        assert!(matches!(core, CoreError::Ingest(_)));
    }

    #[test]
    fn error_is_std_error() {
        fn assert_error<E: std::error::Error>(_: &E) {}
        assert_error(&CoreError::EmptyCashFlowSeries);
    }
}
