/// Continuation markers the model emits after its answer, longest first so a
/// longer marker is never left half-stripped by a shorter one it contains.
pub const CONTINUATION_SUFFIXES: [&str; 10] = [
    "</s><s>[INST]",
    "</s><s>[INST",
    "</s><s>[INS",
    "</s><s>[IN",
    "</s><s>[I",
    "</s><s>[",
    "</s><s>",
    "</s><s",
    "</s><",
    "</s>",
];

/// Strips at most one trailing continuation marker from raw model output.
pub fn sanitize(raw: &str) -> &str {
    for suffix in CONTINUATION_SUFFIXES {
        if let Some(stripped) = raw.strip_suffix(suffix) {
            return stripped;
        }
    }
    raw
}
