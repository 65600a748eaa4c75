pub mod firstrade;
