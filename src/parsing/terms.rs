use crate::core::term::Term;
use crate::parsing::ParseError;

/// Parse `"1,2,3"`, `"1 2 3"` or `"1, 2, 3"` into terms.
///
/// Commas and whitespace are both separators, and runs of mixed separators
/// collapse into one.
///
/// # Errors
///
/// Returns `ParseError::EmptyInput` if the text is blank, or
/// `ParseError::BadTerm` naming the first token that is not an integer.
pub fn parse_terms(text: &str) -> Result<Vec<Term>, ParseError> {
    let raw = text.trim();
    if raw.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let terms = raw
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<Term>()
                .map_err(|_| ParseError::BadTerm(token.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    // Input made only of separators, e.g. ",,,"
    if terms.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    Ok(terms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::term::terms_from;

    #[test]
    fn test_parse_terms_commas_and_spaces() {
        assert_eq!(parse_terms("1, 2,3  4").unwrap(), terms_from(&[1, 2, 3, 4]));
    }

    #[test]
    fn test_parse_terms_newlines_and_negatives() {
        assert_eq!(
            parse_terms("1\n-2\t3,\n").unwrap(),
            terms_from(&[1, -2, 3])
        );
    }

    #[test]
    fn test_parse_terms_empty() {
        assert_eq!(parse_terms(""), Err(ParseError::EmptyInput));
        assert_eq!(parse_terms("  \n\t "), Err(ParseError::EmptyInput));
        assert_eq!(parse_terms(" , ,"), Err(ParseError::EmptyInput));
    }

    #[test]
    fn test_parse_terms_bad_token() {
        assert_eq!(
            parse_terms("1, 2, three, 4"),
            Err(ParseError::BadTerm("three".to_string()))
        );
        let err = parse_terms("1 2.5").unwrap_err();
        assert_eq!(err.to_string(), "bad term '2.5' (expected integer)");
    }
}
