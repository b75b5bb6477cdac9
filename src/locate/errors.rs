use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResolveError {
    /// Neither resolution strategy could locate the element's opening tag.
    /// Indicates a disagreement between the parsed tree and the raw text.
    #[error("unable to locate an element of type `{tag}` in the source text")]
    UnresolvedElement { tag: String },
}
