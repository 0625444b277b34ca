//! The navigation bar shown on every page behind the auth gate.

use maud::{Markup, html};

use crate::endpoints;

struct Link<'a> {
    url: &'a str,
    title: &'a str,
}

/// The top navigation bar.
pub struct NavBar<'a> {
    links: Vec<Link<'a>>,
}

impl NavBar<'_> {
    /// Get the navigation bar with the app's fixed set of links.
    pub fn new() -> NavBar<'static> {
        let links = vec![
            Link {
                url: endpoints::DASHBOARD_VIEW,
                title: "Painel",
            },
            Link {
                url: endpoints::NEW_TRANSACTION_VIEW,
                title: "Nova transação",
            },
            Link {
                url: endpoints::EXPORT_CSV,
                title: "Exportar CSV",
            },
            Link {
                url: endpoints::LOG_OUT,
                title: "Sair",
            },
        ];

        NavBar { links }
    }

    /// Render the bar.
    pub fn into_html(self) -> Markup {
        html! {
            nav
            {
                span class="brand" { "Livro Caixa" }
                @for link in &self.links
                {
                    a href=(link.url) { (link.title) }
                }
            }
        }
    }
}
