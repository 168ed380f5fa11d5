use crate::domain::{ContactSubmission, EmailAddress};

/// Email ready to be handed to a transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
    pub reply_to: EmailAddress,
}

impl OutboundEmail {
    /// Build the email relayed to the operator inbox for a contact submission
    pub fn compose(submission: &ContactSubmission) -> Self {
        let name = submission.name.as_ref();
        let email = submission.email.as_ref();
        let message = submission.message.as_ref();

        let subject = format!("New message from {name}");
        let text_body = format!(
            "You received a new message from your portfolio contact form:\n\n\
            Name: {name}\nEmail: {email}\n\nMessage:\n{message}"
        );
        let html_body = html_body(name, email, message);

        Self {
            subject,
            html_body,
            text_body,
            reply_to: submission.email.clone(),
        }
    }
}

/// Render the HTML version of the relayed email, every field is escaped
fn html_body(name: &str, email: &str, message: &str) -> String {
    let name = escape_html(name);
    let email = escape_html(email);
    let message = newlines_to_breaks(&escape_html(message));
    format!(
        "<!DOCTYPE html>\
        <html><body style=\"font-family: sans-serif;\">\
        <h2>New message from your portfolio contact form</h2>\
        <p><strong>Name:</strong> {name}</p>\
        <p><strong>Email:</strong> <a href=\"mailto:{email}\">{email}</a></p>\
        <p><strong>Message:</strong></p>\
        <p>{message}</p>\
        </body></html>"
    )
}

/// Escape the characters that are special in HTML text and attribute values
pub fn escape_html(s: &str) -> String {
    // `&` goes first, otherwise the other replacements would be escaped twice
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Turn every line ending into a `<br />` tag
fn newlines_to_breaks(s: &str) -> String {
    s.replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace('\n', "<br />")
}
