mod wheel;
pub use wheel::WheelView;

mod name_list;
pub use name_list::NameEditor;

mod result_popup;
pub use result_popup::ResultPopup;

mod branding;
pub use branding::{footer, header, Backdrop};

mod log_window;
pub use log_window::LogWindow;
