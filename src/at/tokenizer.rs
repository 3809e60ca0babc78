use alloc::vec::Vec;
use core::ops::ControlFlow;

/// Line separator of AT replies
pub const SEPARATOR: &str = "\r\n";

/// Splits `text` into the non-empty pieces between occurrences of `sep`.
///
/// The remainder after the last separator is kept unless `ignore_single_ended` is set,
/// which is used when a complete reply always ends with the separator.
pub fn tokenize<'a>(text: &'a str, sep: &str, ignore_single_ended: bool) -> Vec<&'a str> {
    let mut tokens = Vec::new();
    let _ = tokenize_with(text, sep, ignore_single_ended, |token| {
        tokens.push(token);
        ControlFlow::<()>::Continue(())
    });
    tokens
}

/// Callback form of [`tokenize`]. Returning [`ControlFlow::Break`] stops the scan and
/// is passed through.
pub fn tokenize_with<'a, B, F>(
    text: &'a str,
    sep: &str,
    ignore_single_ended: bool,
    mut op: F,
) -> ControlFlow<B>
where
    F: FnMut(&'a str) -> ControlFlow<B>,
{
    if sep.is_empty() {
        return match text.is_empty() || ignore_single_ended {
            true => ControlFlow::Continue(()),
            false => op(text),
        };
    }

    let mut rest = text;
    while !rest.is_empty() {
        let Some(end) = rest.find(sep) else {
            if !ignore_single_ended {
                return op(rest);
            }
            break;
        };

        if end > 0 {
            if let ControlFlow::Break(b) = op(&rest[..end]) {
                return ControlFlow::Break(b);
            }
        }
        rest = &rest[end + sep.len()..];
    }

    ControlFlow::Continue(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn splits_reply_lines() {
        assert_eq!(
            tokenize("\r\n+CSQ: 15,2\r\n\r\nOK\r\n", SEPARATOR, true),
            vec!["+CSQ: 15,2", "OK"]
        );
    }

    #[test]
    fn empty_input_and_only_separators() {
        assert!(tokenize("", SEPARATOR, false).is_empty());
        assert!(tokenize("\r\n\r\n\r\n", SEPARATOR, false).is_empty());
    }

    #[test]
    fn trailing_remainder_depends_on_policy() {
        assert_eq!(tokenize("\r\n> ", SEPARATOR, false), vec!["> "]);
        assert!(tokenize("\r\n> ", SEPARATOR, true).is_empty());
        assert_eq!(tokenize("A\r\nB", SEPARATOR, true), vec!["A"]);
        assert_eq!(tokenize("A\r\nB", SEPARATOR, false), vec!["A", "B"]);
    }

    #[test]
    fn leading_token_without_separator_is_kept() {
        assert_eq!(tokenize("RING\r\nOK\r\n", SEPARATOR, true), vec!["RING", "OK"]);
    }

    #[test]
    fn lone_carriage_return_is_not_a_separator() {
        assert_eq!(tokenize("a\rb\r\n", SEPARATOR, true), vec!["a\rb"]);
    }

    #[test]
    fn callback_can_stop_early() {
        let mut seen = Vec::new();
        let flow = tokenize_with("A\r\nB\r\nC\r\n", SEPARATOR, true, |token| {
            seen.push(token);
            match token {
                "B" => ControlFlow::Break(token),
                _ => ControlFlow::Continue(()),
            }
        });
        assert_eq!(flow, ControlFlow::Break("B"));
        assert_eq!(seen, vec!["A", "B"]);
    }

    #[test]
    fn other_separators() {
        assert_eq!(tokenize("1,,2,3", ",", false), vec!["1", "2", "3"]);
        assert_eq!(tokenize("abc", "", false), vec!["abc"]);
    }
}
