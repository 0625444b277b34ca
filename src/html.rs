//! The base page layout and shared rendering helpers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{DOCTYPE, Markup, PreEscaped, html};

/// The stylesheet for every page. Inlined so the server has no static assets
/// to serve.
const STYLES: &str = r#"
    * { box-sizing: border-box; }
    body {
        margin: 0; padding: 1.5rem; background: #f4f5f7; color: #1f2430;
        font-family: system-ui, -apple-system, 'Segoe UI', sans-serif;
    }
    main { max-width: 64rem; margin: 0 auto; }
    nav { display: flex; gap: 1rem; margin-bottom: 1.5rem; align-items: baseline; }
    nav .brand { font-size: 1.25rem; font-weight: 700; margin-right: auto; }
    nav a { color: #28539c; text-decoration: none; font-weight: 600; }
    nav a:hover { text-decoration: underline; }
    h1 { font-size: 1.4rem; }
    h2 { font-size: 1.1rem; margin-top: 2rem; }
    table { width: 100%; border-collapse: collapse; background: #fff; }
    th, td { padding: 0.4rem 0.6rem; border-bottom: 1px solid #e3e6eb; text-align: left; }
    th { background: #eef1f6; }
    .cards { display: flex; gap: 1rem; flex-wrap: wrap; }
    .card {
        flex: 1 1 12rem; background: #fff; border-radius: 0.5rem;
        padding: 1rem; box-shadow: 0 1px 2px rgba(31, 36, 48, 0.12);
    }
    .card .label { font-size: 0.8rem; color: #5a6270; text-transform: uppercase; }
    .card .value { font-size: 1.3rem; font-weight: 700; }
    .banner { padding: 0.7rem 1rem; border-radius: 0.4rem; margin-bottom: 1rem; }
    .banner.sucesso { background: #e3f4e6; color: #1d5a2a; }
    .banner.aviso { background: #fdf3dc; color: #7a5a12; }
    .banner.erro { background: #fbe3e4; color: #8a1f2a; }
    form.stacked { max-width: 28rem; background: #fff; padding: 1.2rem; border-radius: 0.5rem; }
    form.stacked label { display: block; margin-top: 0.8rem; font-weight: 600; font-size: 0.9rem; }
    form.stacked input, form.stacked select {
        width: 100%; padding: 0.45rem; margin-top: 0.25rem;
        border: 1px solid #c4cad4; border-radius: 0.3rem; font-size: 1rem;
    }
    button {
        margin-top: 1.2rem; padding: 0.5rem 1.2rem; border: none; border-radius: 0.3rem;
        background: #28539c; color: #fff; font-size: 1rem; cursor: pointer;
    }
    button:hover { background: #1d3f78; }
    .actions a { margin-right: 0.5rem; }
    .amount { text-align: right; white-space: nowrap; }
"#;

/// Wrap `content` in the shared page skeleton.
pub fn base(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="pt-BR"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Livro Caixa" }
                style { (PreEscaped(STYLES)) }
            }

            body
            {
                main { (content) }
            }
        }
    }
}

/// Render `markup` as an HTML response with `status_code`.
#[inline]
pub fn render(status_code: StatusCode, markup: Markup) -> Response {
    (status_code, markup).into_response()
}
