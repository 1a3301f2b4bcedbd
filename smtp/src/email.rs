use contact_types::Submission;
use email_address::EmailAddress;
use std::str::FromStr;

const SUBJECT_PREFIX: &str = "New Contact Form Submission";
const FOOTER: &str = "This message was sent from your portfolio website contact form.";

#[derive(Debug, Clone, PartialEq)]
pub struct ReplyTo {
    pub name: String,
    pub address: EmailAddress,
}

/// A contact message ready to hand to a [`crate::Mailer`].
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundEmail {
    pub from: EmailAddress,
    pub to: EmailAddress,
    pub reply_to: Option<ReplyTo>,
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

impl OutboundEmail {
    /// Builds the notification for a validated submission. The plain-text body
    /// carries the submitted values verbatim; the HTML body escapes them.
    pub fn compose(submission: &Submission, from: EmailAddress, to: EmailAddress) -> Self {
        let Submission {
            name,
            email,
            subject,
            message,
        } = submission;

        // The relay accepts looser addresses than a mailbox header does.
        let reply_to = EmailAddress::from_str(email.trim())
            .ok()
            .map(|address| ReplyTo {
                name: display_name(name),
                address,
            });

        let text_body = format!(
            "{SUBJECT_PREFIX}\n\
             \n\
             From: {name} ({email})\n\
             Subject: {subject}\n\
             \n\
             Message:\n\
             {message}\n\
             \n\
             ---\n\
             {FOOTER}\n"
        );

        let html_body = format!(
            r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
    <h2 style="color: #667eea;">{SUBJECT_PREFIX}</h2>
    <div style="background: #f5f5f5; padding: 20px; border-radius: 8px; margin: 20px 0;">
        <p><strong>From:</strong> {name} ({email})</p>
        <p><strong>Subject:</strong> {subject}</p>
        <p><strong>Message:</strong></p>
        <div style="white-space: pre-wrap; background: white; padding: 15px; border-radius: 4px; border-left: 4px solid #667eea;">{message}</div>
    </div>
    <p style="color: #666; font-size: 12px;">{FOOTER}</p>
</div>
"#,
            name = escape_html(name),
            email = escape_html(email),
            subject = escape_html(subject),
            message = escape_html(message),
        );

        Self {
            from,
            to,
            reply_to,
            subject: format!("{SUBJECT_PREFIX}: {}", subject.trim()),
            text_body,
            html_body,
        }
    }
}

/// Folds a submitted name onto one line so it can sit in a mailbox header.
pub(crate) fn display_name(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(s: &str) -> EmailAddress {
        EmailAddress::new_unchecked(s)
    }

    fn submission() -> Submission {
        Submission {
            name: "Jo".to_string(),
            email: "jo@x.com".to_string(),
            subject: "Hi".to_string(),
            message: "Hello,\n  second line & more".to_string(),
        }
    }

    #[test]
    fn test_compose_simple_case() {
        let email = OutboundEmail::compose(
            &submission(),
            addr("portfolio@example.com"),
            addr("contact@example.com"),
        );

        assert_eq!(email.from.as_str(), "portfolio@example.com");
        assert_eq!(email.to.as_str(), "contact@example.com");
        assert_eq!(email.subject, "New Contact Form Submission: Hi");
        assert_eq!(
            email.reply_to,
            Some(ReplyTo {
                name: "Jo".to_string(),
                address: addr("jo@x.com"),
            })
        );

        assert!(email.text_body.contains("From: Jo (jo@x.com)"));
        assert!(email.text_body.contains("Subject: Hi"));
        assert!(email.text_body.contains("Hello,\n  second line & more"));
        assert!(email.text_body.ends_with(&format!("{FOOTER}\n")));
    }

    #[test]
    fn test_html_body_is_escaped() {
        let mut s = submission();
        s.name = "<script>alert(1)</script>".to_string();

        let email = OutboundEmail::compose(&s, addr("a@example.com"), addr("b@example.com"));

        assert!(!email.html_body.contains("<script>"));
        assert!(email.html_body.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(email.html_body.contains("second line &amp; more"));
        // The plain-text body is left untouched.
        assert!(email.text_body.contains("<script>alert(1)</script>"));
    }

    #[test]
    fn test_reply_to_skipped_for_unparseable_address() {
        let mut s = submission();
        s.email = "a<b@x.com".to_string();

        let email = OutboundEmail::compose(&s, addr("a@example.com"), addr("b@example.com"));

        assert_eq!(email.reply_to, None);
        assert!(email.text_body.contains("(a<b@x.com)"));
    }

    #[test]
    fn test_reply_to_name_is_single_line() {
        let mut s = submission();
        s.name = " Jo\r\n  Bloggs\n".to_string();

        let email = OutboundEmail::compose(&s, addr("a@example.com"), addr("b@example.com"));

        assert_eq!(email.reply_to.unwrap().name, "Jo Bloggs");
        assert!(email.text_body.contains("From:  Jo\r\n  Bloggs\n (jo@x.com)"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html(r#"a&b<c>"d"'e"#), "a&amp;b&lt;c&gt;&quot;d&quot;&#39;e");
        assert_eq!(escape_html("plain"), "plain");
    }
}
