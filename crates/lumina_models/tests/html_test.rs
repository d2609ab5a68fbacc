//! Readable-text extraction from fetched pages.

use lumina_models::extract_text;

#[test]
fn test_prefers_main_when_no_article() {
    let html = r#"<html><head><title>Site</title><style>p { color: red }</style></head>
        <body>
          <header>Banco Exemplo</header>
          <main><h2>Pix seguro</h2><p>Confira o destinatário antes de confirmar.</p></main>
          <footer>Todos os direitos reservados</footer>
        </body></html>"#;

    let text = extract_text(html);
    assert_eq!(text, "Pix seguro\nConfira o destinatário antes de confirmar.");
}

#[test]
fn test_falls_back_to_body() {
    let html = "<html><body><div>Primeiro</div><div>Segundo <b>trecho</b></div></body></html>";
    let text = extract_text(html);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines, vec!["Primeiro", "Segundo", "trecho"]);
}

#[test]
fn test_boilerplate_only_page_is_empty() {
    let html = "<html><body><nav>Início</nav><script>track()</script><form>Busca</form></body></html>";
    assert!(extract_text(html).is_empty());
}
