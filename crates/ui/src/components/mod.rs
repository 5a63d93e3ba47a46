pub mod footer;
pub mod header;
pub mod ready_panel;
pub mod terminal_body;

pub use footer::Footer;
pub use header::Header;
pub use ready_panel::ReadyPanel;
pub use terminal_body::TerminalBody;
