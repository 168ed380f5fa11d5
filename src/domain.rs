mod contact_submission;
mod email_address;
mod message_content;
mod sender_name;

pub use contact_submission::*;
pub use email_address::*;
pub use message_content::*;
pub use sender_name::*;
