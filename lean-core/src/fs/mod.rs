pub mod paths;
pub mod persistence;
pub mod storage;

pub use paths::{find_cli_root, is_path_valid, relative_path, PathManager};
pub use persistence::{load_document, save_document};
pub use storage::Storage;
