//! Logical-name synthesis for generated template resources.
//!
//! Every resource Nomos emits is stored under a synthesized logical name
//! built from identifier fragments. [`normalize_name`] turns arbitrary
//! strings (role names, ARNs, export names) into such fragments, and
//! [`LogicalIdResolver`] maps a function's declared name to the logical id
//! the surrounding deployment template knows it by.

/// Normalizes an arbitrary string into a logical-name fragment.
///
/// Title-cases the first character of each word run, then strips every
/// character that is not ASCII alphanumeric. The result is safe to embed
/// in a CloudFormation logical id.
///
/// # Examples
///
/// ```rust
/// use nomos_core::naming::normalize_name;
///
/// assert_eq!(
///     normalize_name("arn:aws:iam::111111111111:root"),
///     "ArnAwsIam111111111111Root"
/// );
/// assert_eq!(normalize_name("cross_account role"), "CrossaccountRole");
/// ```
#[must_use]
pub fn normalize_name(name: &str) -> String {
    let mut normalized = String::with_capacity(name.len());
    let mut prev_is_word = false;
    for ch in name.chars() {
        // Underscore counts as a word character (no boundary) but is
        // stripped from the output along with the separators.
        let is_word = ch.is_ascii_alphanumeric() || ch == '_';
        if ch.is_ascii_alphanumeric() {
            if prev_is_word {
                normalized.push(ch);
            } else {
                normalized.push(ch.to_ascii_uppercase());
            }
        }
        prev_is_word = is_word;
    }
    normalized
}

/// Maps a function's declared name to its logical id in the deployment
/// template.
///
/// The resolver is an external collaborator from Nomos's point of view:
/// the compiler only ever calls it as an opaque lookup and embeds the
/// result in synthesized resource names and `Fn::GetAtt` references.
pub trait LogicalIdResolver {
    /// Returns the logical id for the function with the given name.
    fn logical_id(&self, function_name: &str) -> String;
}

/// The stock serverless naming convention: `myFunc` becomes
/// `MyFuncLambdaFunction`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServerlessNaming;

impl LogicalIdResolver for ServerlessNaming {
    fn logical_id(&self, function_name: &str) -> String {
        let mut chars = function_name.chars();
        chars.next().map_or_else(
            || "LambdaFunction".to_string(),
            |first| format!("{}{}LambdaFunction", first.to_uppercase(), chars.as_str()),
        )
    }
}
