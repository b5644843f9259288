pub fn validate_account_name(name: &str) -> Result<(), String> {
    if !(2..=20).contains(&name.len()) {
        return Err(format!(
            "Failed account name length check: 2 <= length={} <= 20",
            name.len()
        ));
    }
    for c in name.chars() {
        if !char_allowed(c) {
            return Err(format!(
                "Disallowed characters found in account name: '{c}' code={:x}",
                c as u32
            ));
        }
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), String> {
    const MAX: usize = 254;
    if email.len() > MAX {
        return Err(format!("E-mail must be at most {MAX} characters long"));
    }
    let Some((local, domain)) = email.split_once('@') else {
        return Err("E-mail must contain '@'".to_owned());
    };
    if local.is_empty() || domain.is_empty() {
        return Err("E-mail must have text on both sides of '@'".to_owned());
    }
    if domain.contains('@') {
        return Err("E-mail must contain a single '@'".to_owned());
    }
    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(format!("Invalid e-mail domain: '{domain}'"));
    }
    if email.chars().any(char::is_whitespace) {
        return Err("E-mail must not contain whitespace".to_owned());
    }
    Ok(())
}

fn char_allowed(c: char) -> bool {
    c.is_alphanumeric() && c.is_ascii() || c == '-' || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_names() {
        assert!(validate_account_name("ab").is_ok());
        assert!(validate_account_name("some-user_01").is_ok());
        assert!(validate_account_name("a").is_err());
        assert!(validate_account_name(&"x".repeat(21)).is_err());
        assert!(validate_account_name("with space").is_err());
        assert!(validate_account_name("héllo").is_err());
    }

    #[test]
    fn emails() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("userexample.com").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("user@").is_err());
        assert!(validate_email("user@a@b.com").is_err());
        assert!(validate_email("user@localhost").is_err());
        assert!(validate_email("user@.com").is_err());
        assert!(validate_email("us er@example.com").is_err());
        assert!(validate_email(&format!("{}@example.com", "a".repeat(250))).is_err());
    }
}
