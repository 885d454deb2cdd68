use std::io::{self, BufRead, Write};

use fxstream_core::Credentials;
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum CredentialsError {
    #[error("{what} is empty")]
    Empty { what: &'static str },

    #[error("stdin closed while reading {what}")]
    Eof { what: &'static str },

    #[error("failed to read {what} from stdin")]
    Read {
        what: &'static str,
        #[source]
        source: io::Error,
    },
}

pub(crate) type Result<T> = std::result::Result<T, CredentialsError>;

const TOKEN: &str = "access token";
const ACCOUNT: &str = "account ID";

/// Берёт токен и счёт из аргументов, недостающее спрашивает у оператора.
///
/// Приглашение пишется в `prompt` (stderr в `main`), чтобы stdout оставался
/// только под котировки.
pub(crate) fn resolve_credentials<R: BufRead, W: Write>(
    token: Option<String>,
    account: Option<String>,
    input: &mut R,
    prompt: &mut W,
) -> Result<Credentials> {
    let token = match token {
        Some(t) => non_empty(t, TOKEN)?,
        None => ask(input, prompt, "Enter your personal access token:", TOKEN)?,
    };
    let account_id = match account {
        Some(a) => non_empty(a, ACCOUNT)?,
        None => ask(input, prompt, "Enter your account ID:", ACCOUNT)?,
    };

    Ok(Credentials { token, account_id })
}

fn ask<R: BufRead, W: Write>(
    input: &mut R,
    prompt: &mut W,
    question: &str,
    what: &'static str,
) -> Result<String> {
    // если приглашение не вывелось, всё равно пробуем читать
    let _ = writeln!(prompt, "{question}").and_then(|_| prompt.flush());

    let mut line = String::new();
    let n = input
        .read_line(&mut line)
        .map_err(|source| CredentialsError::Read { what, source })?;
    if n == 0 {
        return Err(CredentialsError::Eof { what });
    }

    non_empty(line, what)
}

fn non_empty(raw: String, what: &'static str) -> Result<String> {
    let s = raw.trim();
    if s.is_empty() {
        return Err(CredentialsError::Empty { what });
    }
    Ok(s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn preconfigured_values_skip_the_prompt() {
        let mut input = Cursor::new("");
        let mut prompt = Vec::new();

        let creds = resolve_credentials(
            Some(" tok ".to_string()),
            Some("123".to_string()),
            &mut input,
            &mut prompt,
        )
        .unwrap();

        assert_eq!(creds.token, "tok");
        assert_eq!(creds.account_id, "123");
        assert!(prompt.is_empty());
    }

    #[test]
    fn missing_values_are_prompted_in_order() {
        let mut input = Cursor::new("tok-from-stdin\n  4567 \n");
        let mut prompt = Vec::new();

        let creds = resolve_credentials(None, None, &mut input, &mut prompt).unwrap();

        assert_eq!(creds.token, "tok-from-stdin");
        assert_eq!(creds.account_id, "4567");
        let shown = String::from_utf8(prompt).unwrap();
        assert!(shown.contains("access token"));
        assert!(shown.contains("account ID"));
    }

    #[test]
    fn closed_stdin_and_blank_answers_fail() {
        let err = resolve_credentials(None, Some("1".into()), &mut Cursor::new(""), &mut io::sink())
            .unwrap_err();
        assert!(matches!(err, CredentialsError::Eof { what: TOKEN }));

        let err = resolve_credentials(Some("t".into()), None, &mut Cursor::new("\n"), &mut io::sink())
            .unwrap_err();
        assert!(matches!(err, CredentialsError::Empty { what: ACCOUNT }));

        let err = resolve_credentials(Some("  ".into()), Some("1".into()), &mut Cursor::new(""), &mut io::sink())
            .unwrap_err();
        assert!(matches!(err, CredentialsError::Empty { what: TOKEN }));
    }
}
