pub mod dispatch;
pub mod history;
