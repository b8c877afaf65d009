pub mod init;
pub mod mutate;
pub mod print;
pub mod score;

pub use init::execute_init;
pub use mutate::execute_mutate;
pub use print::execute_print;
pub use score::execute_score;
