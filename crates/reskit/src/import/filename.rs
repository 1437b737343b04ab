//! Filename-encoded condition parsing: `welcome.language=fr.json` declares a
//! candidate for resource `welcome` gated on `language=fr`.

use crate::error::Result;

/// The result of splitting a filename into its condition-stripped basename
/// and the raw condition tokens found in its tail segment, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenameConditions {
    pub basename: String,
    pub tokens: Vec<String>,
}

/// Parse `filename` (including its extension, e.g. `welcome.language=fr.json`).
///
/// 1. Split on `.`; the segment before the extension is the candidate tail.
/// 2. Split the tail on `,` into condition tokens, each either `qualifier=value`
///    or a bare `value`.
/// 3. If there is more than one token, or the single token contains `=`,
///    the tail is a condition list: strip it from the basename and return
///    the tokens. Bare tokens are returned as-is; resolving which qualifier
///    a bare token binds to (by trying each registered qualifier type's
///    value domain) is [`super::condition_token::parse`]'s job, since it
///    needs the qualifier registry this module doesn't have.
/// 4. If there is a single token with no `=`, it is not a condition at all
///    (e.g. a plain `v2` suffix); the filename is returned unchanged with no
///    tokens.
pub fn parse_filename_conditions(filename: &str) -> Result<FilenameConditions> {
    let (stem, extension) = match filename.rsplit_once('.') {
        Some((stem, extension)) => (stem, Some(extension)),
        None => (filename, None),
    };
    let segments: Vec<&str> = stem.split('.').collect();
    if segments.len() < 2 {
        return Ok(FilenameConditions {
            basename: filename.to_string(),
            tokens: vec![],
        });
    }
    let tail = segments[segments.len() - 1];
    let base_segments = &segments[..segments.len() - 1];
    let tokens: Vec<&str> = tail.split(',').collect();
    let is_condition_tail = tokens.len() > 1 || tokens[0].contains('=');

    if is_condition_tail {
        let mut basename = base_segments.join(".");
        if let Some(extension) = extension {
            basename.push('.');
            basename.push_str(extension);
        }
        return Ok(FilenameConditions {
            basename,
            tokens: tokens.into_iter().map(String::from).collect(),
        });
    }

    Ok(FilenameConditions {
        basename: filename.to_string(),
        tokens: vec![],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_condition_token_strips_basename() {
        let parsed = parse_filename_conditions("welcome.language=fr.json").unwrap();
        assert_eq!(parsed.basename, "welcome.json");
        assert_eq!(parsed.tokens, vec!["language=fr"]);
    }

    #[test]
    fn multiple_condition_tokens() {
        let parsed = parse_filename_conditions("welcome.language=fr,territory=CA.json").unwrap();
        assert_eq!(parsed.basename, "welcome.json");
        assert_eq!(parsed.tokens, vec!["language=fr", "territory=CA"]);
    }

    #[test]
    fn plain_filename_has_no_tokens() {
        let parsed = parse_filename_conditions("welcome.json").unwrap();
        assert_eq!(parsed.basename, "welcome.json");
        assert!(parsed.tokens.is_empty());
    }

    #[test]
    fn single_anonymous_tail_segment_is_not_a_condition() {
        let parsed = parse_filename_conditions("welcome.v2.json").unwrap();
        assert_eq!(parsed.basename, "welcome.v2.json");
        assert!(parsed.tokens.is_empty());
    }

    #[test]
    fn a_bare_token_among_several_is_kept_as_a_condition_token() {
        let parsed = parse_filename_conditions("welcome.fr,territory=CA.json").unwrap();
        assert_eq!(parsed.basename, "welcome.json");
        assert_eq!(parsed.tokens, vec!["fr", "territory=CA"]);
    }

    #[test]
    fn several_bare_tokens_are_all_kept_as_condition_tokens() {
        let parsed = parse_filename_conditions("welcome.fr,CA.json").unwrap();
        assert_eq!(parsed.basename, "welcome.json");
        assert_eq!(parsed.tokens, vec!["fr", "CA"]);
    }
}
