pub mod card_validation;
pub mod code_identity;
pub mod ledger_engine;
pub mod utils;
