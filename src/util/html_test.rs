use super::*;

#[test]
fn escapes_script_tag() {
    assert_eq!(escape_html("<script>"), "&lt;script&gt;");
}

#[test]
fn escapes_all_five_characters() {
    assert_eq!(escape_html(r#"&<>"'"#), "&amp;&lt;&gt;&quot;&#039;");
}

#[test]
fn ampersand_in_existing_entity_is_escaped_once() {
    assert_eq!(escape_html("&lt;"), "&amp;lt;");
}

#[test]
fn plain_text_passes_through() {
    assert_eq!(escape_html("Ada Lovelace"), "Ada Lovelace");
    assert_eq!(escape_html("Zoë 🎉"), "Zoë 🎉");
    assert_eq!(escape_html(""), "");
}
