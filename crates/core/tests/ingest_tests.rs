// ═══════════════════════════════════════════════════════════════════
// Ingestion Tests — Firstrade trade-history CSV parsing
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;

use index_benchmark_core::errors::CoreError;
use index_benchmark_core::ingest::firstrade::{build_series, parse_trade_history};

fn make_date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

mod parse {
    use super::*;

    #[test]
    fn keeps_only_trade_records() {
        let csv = "\
RecordType,TradeDate,Amount,Symbol,Description
Trade,2023-01-02,-1000.00,VOO,BUY 4 VOO
Dividend,2023-03-15,12.34,VOO,DIVIDEND
Journal,2023-03-16,500.00,,ACH DEPOSIT
Trade,2023-06-01,-500.00,VTI,BUY 2 VTI
";
        let flows = parse_trade_history(csv).unwrap();
        assert_eq!(flows.len(), 2);
        assert_eq!(flows[0].date, make_date(2023, 1, 2));
        assert_eq!(flows[0].amount, -1000.0);
        assert_eq!(flows[1].amount, -500.0);
    }

    #[test]
    fn accepts_us_style_dates() {
        let csv = "\
RecordType,TradeDate,Amount
Trade,06/01/2023,-500.00
";
        let flows = parse_trade_history(csv).unwrap();
        assert_eq!(flows.len(), 1);
        assert_eq!(flows[0].date, make_date(2023, 6, 1));
    }

    #[test]
    fn skips_rows_with_malformed_dates() {
        let csv = "\
RecordType,TradeDate,Amount
Trade,2023-01-02,-1000.00
Trade,not-a-date,-250.00
Trade,2023-06-01,-500.00
";
        let flows = parse_trade_history(csv).unwrap();
        assert_eq!(flows.len(), 2);
        assert!(flows.iter().all(|cf| cf.amount != -250.0));
    }

    #[test]
    fn sell_trades_keep_positive_amounts() {
        let csv = "\
RecordType,TradeDate,Amount
Trade,2023-01-02,-1000.00
Trade,2023-08-15,400.00
";
        let flows = parse_trade_history(csv).unwrap();
        assert_eq!(flows.len(), 2);
        assert_eq!(flows[1].amount, 400.0);
    }

    #[test]
    fn unreadable_amount_is_an_error() {
        let csv = "\
RecordType,TradeDate,Amount
Trade,2023-01-02,one thousand
";
        let result = parse_trade_history(csv);
        match result.unwrap_err() {
            CoreError::Ingest(msg) => assert!(msg.contains("amount")),
            other => panic!("Expected Ingest error, got {:?}", other),
        }
    }

    #[test]
    fn amount_whitespace_is_tolerated() {
        let csv = "\
RecordType,TradeDate,Amount
Trade,2023-01-02, -1000.00
";
        let flows = parse_trade_history(csv).unwrap();
        assert_eq!(flows[0].amount, -1000.0);
    }

    #[test]
    fn no_trade_rows_yields_empty_list() {
        let csv = "\
RecordType,TradeDate,Amount
Dividend,2023-03-15,12.34
";
        let flows = parse_trade_history(csv).unwrap();
        assert!(flows.is_empty());
    }

    #[test]
    fn missing_columns_is_an_error() {
        let csv = "\
RecordType,TradeDate
Trade,2023-01-02
";
        assert!(parse_trade_history(csv).is_err());
    }
}

mod series {
    use super::*;

    #[test]
    fn builds_sorted_series_with_valuation() {
        let csv = "\
RecordType,TradeDate,Amount
Trade,2023-06-01,-500.00
Trade,2023-01-02,-1000.00
";
        let s = build_series(csv, make_date(2024, 1, 2), 1700.0).unwrap();
        assert_eq!(s.len(), 3);
        assert_eq!(s.first_date(), make_date(2023, 1, 2));
        assert_eq!(s.valuation().date, make_date(2024, 1, 2));
        assert_eq!(s.valuation().amount, 1700.0);
        assert!((s.total_invested() - 1500.0).abs() < 1e-12);
    }

    #[test]
    fn negative_market_value_is_rejected() {
        let csv = "\
RecordType,TradeDate,Amount
Trade,2023-01-02,-1000.00
";
        let result = build_series(csv, make_date(2024, 1, 2), -1.0);
        assert!(matches!(
            result.unwrap_err(),
            CoreError::ValidationError(_)
        ));
    }

    #[test]
    fn valuation_before_last_trade_is_rejected() {
        let csv = "\
RecordType,TradeDate,Amount
Trade,2023-06-01,-500.00
";
        let result = build_series(csv, make_date(2023, 1, 1), 600.0);
        assert!(result.is_err());
    }
}
