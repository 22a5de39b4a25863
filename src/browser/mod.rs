pub mod headless;

pub use headless::{launch_chrome, ChromeSession};
