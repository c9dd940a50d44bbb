pub mod fee_api;
