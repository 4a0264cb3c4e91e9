//! Best-effort delivery of parent notifications and contact mail. The
//! workflow only enqueues SMS intents; the dispatcher drains them through a
//! `MessageSender`. Contact mail goes straight through a `Mailer`.

pub mod dispatcher;
pub mod mail;
pub mod sender;
pub mod twilio;

pub use dispatcher::Dispatcher;
pub use mail::{LogMailer, Mailer, SmtpMailer};
pub use sender::{LogSender, MessageSender};
pub use twilio::TwilioSmsSender;
