//! Clientes: people and companies the office represents

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{boolean, date, labelled_enum, label, text, ymd, Entity};
use crate::error::{ListError, Result};
use crate::record::{FieldKind, FieldValue, Record, RecordId};
use crate::schema::EntitySchema;

labelled_enum! {
    ClientKind {
        PessoaFisica => "Pessoa Física",
        PessoaJuridica => "Pessoa Jurídica",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: RecordId,
    pub name: String,
    /// CPF or CNPJ
    pub document: String,
    pub email: String,
    pub phone: String,
    pub city: String,
    pub kind: ClientKind,
    pub active: bool,
    pub since: NaiveDate,
}

pub const SCHEMA: EntitySchema = EntitySchema {
    name: "clients",
    title: "Clientes",
    fields: &[
        ("name", FieldKind::Text),
        ("document", FieldKind::Text),
        ("email", FieldKind::Text),
        ("phone", FieldKind::Text),
        ("city", FieldKind::Text),
        ("kind", FieldKind::Text),
        ("active", FieldKind::Bool),
        ("since", FieldKind::Date),
    ],
    searchable: &["name", "document", "email", "city"],
    filterable: &["kind", "active"],
    sortable: &["name", "city", "since"],
    page_size: 10,
};

impl Record for Client {
    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        Some(match name {
            "name" => self.name.as_str().into(),
            "document" => self.document.as_str().into(),
            "email" => self.email.as_str().into(),
            "phone" => self.phone.as_str().into(),
            "city" => self.city.as_str().into(),
            "kind" => self.kind.into(),
            "active" => self.active.into(),
            "since" => self.since.into(),
            _ => return None,
        })
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> Result<()> {
        match name {
            "name" => self.name = text(name, value)?,
            "document" => self.document = text(name, value)?,
            "email" => self.email = text(name, value)?,
            "phone" => self.phone = text(name, value)?,
            "city" => self.city = text(name, value)?,
            "kind" => self.kind = label(name, value)?,
            "active" => self.active = boolean(name, value)?,
            "since" => self.since = date(name, value)?,
            _ => return Err(ListError::unknown_field(SCHEMA.name, name)),
        }
        Ok(())
    }
}

impl Entity for Client {
    fn schema() -> &'static EntitySchema {
        &SCHEMA
    }

    fn fixtures() -> Vec<Self> {
        let rows: [(&str, &str, &str, &str, &str, ClientKind, bool, NaiveDate); 10] = [
            (
                "João Silva",
                "123.456.789-00",
                "joao.silva@email.com",
                "(11) 98765-4321",
                "São Paulo",
                ClientKind::PessoaFisica,
                true,
                ymd(2021, 2, 10),
            ),
            (
                "Ana Costa",
                "234.567.890-11",
                "ana.costa@email.com",
                "(11) 97654-3210",
                "Guarulhos",
                ClientKind::PessoaFisica,
                true,
                ymd(2022, 7, 1),
            ),
            (
                "Construtora Horizonte Ltda",
                "12.345.678/0001-90",
                "juridico@horizonte.com.br",
                "(11) 3456-7890",
                "São Paulo",
                ClientKind::PessoaJuridica,
                true,
                ymd(2020, 11, 3),
            ),
            (
                "Mariana Oliveira",
                "345.678.901-22",
                "mariana.o@email.com",
                "(21) 99876-5432",
                "Rio de Janeiro",
                ClientKind::PessoaFisica,
                false,
                ymd(2023, 12, 20),
            ),
            (
                "Carlos Pereira",
                "456.789.012-33",
                "carlos.p@email.com",
                "(11) 96543-2109",
                "Osasco",
                ClientKind::PessoaFisica,
                false,
                ymd(2019, 5, 14),
            ),
            (
                "Fernanda Lima",
                "567.890.123-44",
                "fernanda.lima@email.com",
                "(19) 98888-7777",
                "Campinas",
                ClientKind::PessoaFisica,
                true,
                ymd(2024, 1, 29),
            ),
            (
                "Comercial Santos ME",
                "23.456.789/0001-01",
                "contato@comercialsantos.com.br",
                "(13) 3222-1100",
                "Santos",
                ClientKind::PessoaJuridica,
                true,
                ymd(2022, 3, 8),
            ),
            (
                "Distribuidora Norte S.A.",
                "34.567.890/0001-12",
                "financeiro@distnorte.com.br",
                "(92) 3333-4444",
                "Manaus",
                ClientKind::PessoaJuridica,
                true,
                ymd(2023, 6, 17),
            ),
            (
                "Patrícia Souza",
                "678.901.234-55",
                "patricia.souza@email.com",
                "(11) 95555-6666",
                "São Bernardo do Campo",
                ClientKind::PessoaFisica,
                true,
                ymd(2024, 3, 25),
            ),
            (
                "Roberto Alves",
                "789.012.345-66",
                "roberto.alves@email.com",
                "(11) 94444-3333",
                "São Paulo",
                ClientKind::PessoaFisica,
                true,
                ymd(2023, 8, 2),
            ),
        ];

        rows.into_iter()
            .enumerate()
            .map(
                |(i, (name, document, email, phone, city, kind, active, since))| Client {
                    id: RecordId(i as u64 + 1),
                    name: name.to_string(),
                    document: document.to_string(),
                    email: email.to_string(),
                    phone: phone.to_string(),
                    city: city.to_string(),
                    kind,
                    active,
                    since,
                },
            )
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list_manager::ListManager;

    #[test]
    fn active_companies() {
        let mut list = ListManager::with_records(SCHEMA, Client::fixtures());
        list.set_filter("kind", ClientKind::PessoaJuridica).unwrap();
        list.set_filter("active", true).unwrap();
        assert_eq!(list.filtered_count(), 3);
    }

    #[test]
    fn search_by_document_fragment() {
        let mut list = ListManager::with_records(SCHEMA, Client::fixtures());
        list.set_search("0001-90");
        let page = list.view();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].name, "Construtora Horizonte Ltda");
    }

    #[test]
    fn sort_by_city_keeps_ties_in_order() {
        let mut list = ListManager::with_records(SCHEMA, Client::fixtures());
        list.set_filter("kind", ClientKind::PessoaFisica).unwrap();
        list.click_sort("city").unwrap();
        let names: Vec<String> = list.view().items.into_iter().map(|c| c.name).collect();
        assert_eq!(names[0], "Fernanda Lima");
        let sp: Vec<&str> = names
            .iter()
            .map(String::as_str)
            .filter(|n| *n == "João Silva" || *n == "Roberto Alves")
            .collect();
        assert_eq!(sp, vec!["João Silva", "Roberto Alves"]);
    }
}
