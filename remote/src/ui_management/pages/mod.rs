mod control_page;

pub use control_page::ControlPage;
