mod forecast;
mod ledger;
mod money;
mod record;
mod transaction;

pub use forecast::*;
pub use ledger::*;
pub use money::*;
pub use record::*;
pub use transaction::*;
