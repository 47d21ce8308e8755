//! Contact form to `mailto:` URI construction.
//!
//! Submitting a contact form hands the user's mail client a prefilled
//! message; there is no server round-trip and nothing is persisted. The
//! decoded body always reads:
//!
//! ```text
//! Name: <name>
//! Email: <email>
//!
//! Message:
//! <message>
//! ```

/// A filled-in contact form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    /// Build the `mailto:` URI for `recipient`, with percent-encoded
    /// subject and body.
    pub fn mailto(&self, recipient: &str) -> String {
        let body = format!(
            "Name: {}\nEmail: {}\n\nMessage:\n{}",
            self.name, self.email, self.message
        );
        format!(
            "mailto:{}?subject={}&body={}",
            recipient,
            percent_encode(&self.subject),
            percent_encode(&body)
        )
    }
}

/// Percent-encode a URI component.
///
/// Alphanumerics and `-_.!~*'()` pass through; every other byte of the
/// UTF-8 encoding becomes `%XX` with uppercase hex.
fn percent_encode(input: &str) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";

    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(byte as char),
            _ => {
                out.push('%');
                out.push(HEX[(byte >> 4) as usize] as char);
                out.push(HEX[(byte & 0x0F) as usize] as char);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal inverse of `percent_encode` for round-trip assertions.
    fn percent_decode(input: &str) -> String {
        let bytes = input.as_bytes();
        let mut out = Vec::with_capacity(bytes.len());
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i] == b'%' {
                let hex = std::str::from_utf8(&bytes[i + 1..i + 3]).unwrap();
                out.push(u8::from_str_radix(hex, 16).unwrap());
                i += 3;
            } else {
                out.push(bytes[i]);
                i += 1;
            }
        }
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_unreserved_passthrough() {
        assert_eq!(percent_encode("Abc-123_.!~*'()"), "Abc-123_.!~*'()");
    }

    #[test]
    fn test_reserved_bytes_encoded() {
        assert_eq!(percent_encode("a b"), "a%20b");
        assert_eq!(percent_encode("a@b"), "a%40b");
        assert_eq!(percent_encode("x:y\nz"), "x%3Ay%0Az");
    }

    #[test]
    fn test_utf8_bytes_encoded() {
        assert_eq!(percent_encode("é"), "%C3%A9");
    }

    #[test]
    fn test_mailto_uri_shape() {
        let form = ContactForm {
            name: "A".into(),
            email: "a@b.com".into(),
            subject: "S".into(),
            message: "M".into(),
        };
        let uri = form.mailto("hello@example.com");
        assert_eq!(
            uri,
            "mailto:hello@example.com?subject=S&body=Name%3A%20A%0AEmail%3A%20a%40b.com%0A%0AMessage%3A%0AM"
        );
    }

    #[test]
    fn test_mailto_body_lines_in_order() {
        let form = ContactForm {
            name: "A".into(),
            email: "a@b.com".into(),
            subject: "S".into(),
            message: "M".into(),
        };
        let uri = form.mailto("hello@example.com");
        let body = uri.split("&body=").nth(1).unwrap();
        let decoded = percent_decode(body);

        let name_at = decoded.find("Name: A").unwrap();
        let email_at = decoded.find("Email: a@b.com").unwrap();
        let message_at = decoded.find("Message:\nM").unwrap();
        assert!(name_at < email_at);
        assert!(email_at < message_at);
    }

    #[test]
    fn test_empty_form() {
        let form = ContactForm::default();
        let uri = form.mailto("hello@example.com");
        assert_eq!(
            uri,
            "mailto:hello@example.com?subject=&body=Name%3A%20%0AEmail%3A%20%0A%0AMessage%3A%0A"
        );
    }
}
