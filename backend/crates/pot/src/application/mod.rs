//! Application Layer - Use Cases

pub mod config;
pub mod leaderboard;
pub mod login;
pub mod record_purchase;
pub mod select_winner;
pub mod token;

pub use leaderboard::ListWinnersUseCase;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use record_purchase::{RecordPurchaseInput, RecordPurchaseUseCase};
pub use select_winner::SelectWinnerUseCase;
