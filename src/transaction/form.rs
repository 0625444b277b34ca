//! The transaction form shared by the add and edit pages: the submitted
//! payload and the page markup.

use maud::{Markup, PreEscaped, html};
use serde::Deserialize;

use crate::{
    Error,
    entity::{EntityKind, Suggestions},
    format::{format_amount, parse_amount, parse_iso_date},
    html::base,
    navigation::NavBar,
    transaction::core::{Status, Transaction, TransactionData, TransactionKind},
};

/// The raw form fields as submitted by the browser. Field names match the
/// stored column names.
///
/// Amount and date arrive as display text and are validated by
/// [TransactionForm::into_data]; keeping them as strings here lets a parse
/// failure surface as a notice instead of a 422 from the extractor.
#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    /// "Entrada" or "Saída".
    pub tipo: String,
    /// The counterparty name as typed.
    pub entidade: String,
    /// The entity kind label, e.g. "Cliente".
    pub natureza: String,
    /// A free-text category; blank means "Outros".
    #[serde(default)]
    pub categoria: String,
    /// A free-text description.
    #[serde(default)]
    pub descricao: String,
    /// The amount in display form, e.g. "1.234,50".
    pub valor: String,
    /// The due date as ISO `YYYY-MM-DD` (HTML date input).
    pub data_vencimento: String,
    /// "Pendente" or "Pago".
    pub status: String,
}

impl TransactionForm {
    /// Validate the submitted fields into a [TransactionData].
    ///
    /// # Errors
    /// Returns an [Error::InvalidAmount], [Error::InvalidDate],
    /// [Error::UnknownTransactionKind], [Error::UnknownEntityKind] or
    /// [Error::UnknownStatus] for the first field that does not parse.
    pub fn into_data(self) -> Result<TransactionData, Error> {
        Ok(TransactionData {
            kind: self.tipo.parse()?,
            entity_name: self.entidade,
            entity_kind: self.natureza.parse()?,
            category: self.categoria,
            description: self.descricao,
            amount: parse_amount(&self.valor)?,
            due_date: parse_iso_date(&self.data_vencimento)?,
            status: self.status.parse()?,
        })
    }
}

/// Swaps the entity input's datalist to match the selected entity kind.
const SUGGESTION_SCRIPT: &str = r#"
    const lists = {
        'Cliente': 'sugestoes-clientes',
        'Colaborador': 'sugestoes-colaboradores',
        'Despesa Geral': 'sugestoes-despesas',
    };
    const natureza = document.getElementById('natureza');
    const entidade = document.getElementById('entidade');
    const sync = () => entidade.setAttribute('list', lists[natureza.value]);
    natureza.addEventListener('change', sync);
    sync();
"#;

/// Render the add/edit form page.
///
/// `transaction` pre-fills the fields on the edit page; the add page passes
/// `None`. `suggestions` feeds one datalist per registry.
pub fn transaction_form_page(
    title: &str,
    action: &str,
    transaction: Option<&Transaction>,
    suggestions: &Suggestions,
) -> Markup {
    let kind = transaction.map(|transaction| transaction.kind);
    let entity_kind = transaction.map(|transaction| transaction.entity_kind);
    let status = transaction.map(|transaction| transaction.status);

    base(
        title,
        html! {
            (NavBar::new().into_html())

            h1 { (title) }

            form class="stacked" method="post" action=(action)
            {
                label for="tipo" { "Tipo" }
                select id="tipo" name="tipo"
                {
                    @for option in [TransactionKind::Inflow, TransactionKind::Outflow]
                    {
                        option value=(option.as_str()) selected[kind == Some(option)]
                        {
                            (option.as_str())
                        }
                    }
                }

                label for="natureza" { "Natureza" }
                select id="natureza" name="natureza"
                {
                    @for option in EntityKind::ALL
                    {
                        option value=(option.as_str()) selected[entity_kind == Some(option)]
                        {
                            (option.as_str())
                        }
                    }
                }

                label for="entidade" { "Entidade" }
                input
                    type="text"
                    id="entidade"
                    name="entidade"
                    list="sugestoes-clientes"
                    value=[transaction.map(|transaction| &transaction.entity_name)]
                    required;

                (suggestion_datalist("sugestoes-clientes", &suggestions.clients))
                (suggestion_datalist("sugestoes-colaboradores", &suggestions.collaborators))
                (suggestion_datalist("sugestoes-despesas", &suggestions.expenses))

                label for="categoria" { "Categoria" }
                input
                    type="text"
                    id="categoria"
                    name="categoria"
                    placeholder="Outros"
                    value=[transaction.map(|transaction| &transaction.category)];

                label for="descricao" { "Descrição" }
                input
                    type="text"
                    id="descricao"
                    name="descricao"
                    value=[transaction.map(|transaction| &transaction.description)];

                label for="valor" { "Valor (R$)" }
                input
                    type="text"
                    id="valor"
                    name="valor"
                    inputmode="decimal"
                    placeholder="1.234,56"
                    value=[transaction.map(|transaction| format_amount(transaction.amount))]
                    required;

                label for="data_vencimento" { "Vencimento" }
                input
                    type="date"
                    id="data_vencimento"
                    name="data_vencimento"
                    value=[transaction.map(|transaction| transaction.due_date.to_string())]
                    required;

                label for="status" { "Status" }
                select id="status" name="status"
                {
                    @for option in [Status::Pending, Status::Paid]
                    {
                        option value=(option.as_str()) selected[status == Some(option)]
                        {
                            (option.as_str())
                        }
                    }
                }

                button type="submit" { "Salvar" }
            }

            script { (PreEscaped(SUGGESTION_SCRIPT)) }
        },
    )
}

fn suggestion_datalist(id: &str, names: &[String]) -> Markup {
    html! {
        datalist id=(id)
        {
            @for name in names
            {
                option value=(name) {}
            }
        }
    }
}

#[cfg(test)]
mod form_tests {
    use time::macros::date;

    use crate::{
        Error,
        entity::EntityKind,
        transaction::core::{Status, TransactionKind},
    };

    use super::TransactionForm;

    fn sample_form() -> TransactionForm {
        TransactionForm {
            tipo: "Saída".to_owned(),
            entidade: " joão silva ".to_owned(),
            natureza: "Cliente".to_owned(),
            categoria: "".to_owned(),
            descricao: "Sofa".to_owned(),
            valor: "1.234,50".to_owned(),
            data_vencimento: "2024-03-01".to_owned(),
            status: "Pendente".to_owned(),
        }
    }

    #[test]
    fn parses_display_values() {
        let data = sample_form().into_data().unwrap();

        assert_eq!(data.kind, TransactionKind::Outflow);
        assert_eq!(data.entity_kind, EntityKind::Client);
        assert_eq!(data.amount, 1234.50);
        assert_eq!(data.due_date, date!(2024 - 03 - 01));
        assert_eq!(data.status, Status::Pending);
    }

    #[test]
    fn rejects_malformed_amount() {
        let form = TransactionForm {
            valor: "1,2,3".to_owned(),
            ..sample_form()
        };

        assert_eq!(
            form.into_data(),
            Err(Error::InvalidAmount("1,2,3".to_owned()))
        );
    }

    #[test]
    fn rejects_unknown_entity_kind() {
        let form = TransactionForm {
            natureza: "Fornecedor".to_owned(),
            ..sample_form()
        };

        assert_eq!(
            form.into_data(),
            Err(Error::UnknownEntityKind("Fornecedor".to_owned()))
        );
    }
}
