/// Decodes the entities the catalog escapes inside attribute values.
///
/// Entities are replaced one table entry at a time, in order, so `&amp;quot;`
/// becomes `&quot;` and not `"`.
pub fn decode_html(text: &str) -> String {
    const TABLE: [(&str, &str); 3] = [("&quot;", "\""), ("&#39;", "'"), ("&amp;", "&")];

    TABLE
        .iter()
        .fold(text.to_owned(), |text, (entity, value)| text.replace(entity, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_entities() {
        assert_eq!(
            decode_html("{&quot;name&quot;:&quot;Rick &amp; Morty&quot;,&quot;o&quot;:&quot;l&#39;uomo&quot;}"),
            r#"{"name":"Rick & Morty","o":"l'uomo"}"#
        );
    }

    #[test]
    fn decoding_is_single_pass_per_entity() {
        assert_eq!(decode_html("&amp;quot;"), "&quot;");
        assert_eq!(decode_html("&lt;b&gt;"), "&lt;b&gt;");
    }
}
