//! Equipe: lawyers, interns and administrative staff

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{boolean, date, labelled_enum, label, number, optional_text, text, ymd, Entity};
use crate::error::{ListError, Result};
use crate::record::{FieldKind, FieldValue, Record, RecordId};
use crate::schema::EntitySchema;

labelled_enum! {
    StaffRole {
        Socio => "Sócio",
        Advogado => "Advogado",
        Estagiario => "Estagiário",
        Secretaria => "Secretária",
        Financeiro => "Financeiro",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: RecordId,
    pub name: String,
    /// Bar registration, only for lawyers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oab: Option<String>,
    pub email: String,
    pub role: StaffRole,
    pub active: bool,
    pub hired_on: NaiveDate,
    pub salary: f64,
}

pub const SCHEMA: EntitySchema = EntitySchema {
    name: "staff",
    title: "Equipe",
    fields: &[
        ("name", FieldKind::Text),
        ("oab", FieldKind::Text),
        ("email", FieldKind::Text),
        ("role", FieldKind::Text),
        ("active", FieldKind::Bool),
        ("hired_on", FieldKind::Date),
        ("salary", FieldKind::Money),
    ],
    searchable: &["name", "oab", "email", "role"],
    filterable: &["role", "active"],
    sortable: &["name", "role", "hired_on", "salary"],
    page_size: 8,
};

impl Record for StaffMember {
    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        Some(match name {
            "name" => self.name.as_str().into(),
            "oab" => self.oab.as_deref().into(),
            "email" => self.email.as_str().into(),
            "role" => self.role.into(),
            "active" => self.active.into(),
            "hired_on" => self.hired_on.into(),
            "salary" => self.salary.into(),
            _ => return None,
        })
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> Result<()> {
        match name {
            "name" => self.name = text(name, value)?,
            "oab" => self.oab = optional_text(name, value)?,
            "email" => self.email = text(name, value)?,
            "role" => self.role = label(name, value)?,
            "active" => self.active = boolean(name, value)?,
            "hired_on" => self.hired_on = date(name, value)?,
            "salary" => self.salary = number(name, value)?,
            _ => return Err(ListError::unknown_field(SCHEMA.name, name)),
        }
        Ok(())
    }
}

impl Entity for StaffMember {
    fn schema() -> &'static EntitySchema {
        &SCHEMA
    }

    fn fixtures() -> Vec<Self> {
        use StaffRole::*;
        let rows = [
            (
                "Dra. Maria Duarte",
                Some("OAB/SP 123.456"),
                "maria.duarte@mdlegal.com.br",
                Socio,
                true,
                ymd(2015, 3, 1),
                28_000.0,
            ),
            (
                "Dr. Daniel Moreira",
                Some("OAB/SP 234.567"),
                "daniel.moreira@mdlegal.com.br",
                Socio,
                true,
                ymd(2015, 3, 1),
                28_000.0,
            ),
            (
                "Dra. Beatriz Ramos",
                Some("OAB/SP 345.678"),
                "beatriz.ramos@mdlegal.com.br",
                Advogado,
                true,
                ymd(2019, 8, 12),
                12_500.0,
            ),
            (
                "Dr. Lucas Ferreira",
                Some("OAB/SP 456.789"),
                "lucas.ferreira@mdlegal.com.br",
                Advogado,
                true,
                ymd(2021, 2, 22),
                10_800.0,
            ),
            (
                "Dr. Thiago Nunes",
                Some("OAB/RJ 98.765"),
                "thiago.nunes@mdlegal.com.br",
                Advogado,
                false,
                ymd(2018, 6, 4),
                11_200.0,
            ),
            (
                "Gabriela Teixeira",
                None,
                "gabriela.teixeira@mdlegal.com.br",
                Estagiario,
                true,
                ymd(2024, 2, 5),
                2_200.0,
            ),
            (
                "Pedro Henrique Lopes",
                None,
                "pedro.lopes@mdlegal.com.br",
                Estagiario,
                true,
                ymd(2024, 7, 15),
                2_200.0,
            ),
            (
                "Cláudia Mendes",
                None,
                "claudia.mendes@mdlegal.com.br",
                Secretaria,
                true,
                ymd(2017, 10, 9),
                4_300.0,
            ),
            (
                "Renata Barbosa",
                None,
                "renata.barbosa@mdlegal.com.br",
                Financeiro,
                true,
                ymd(2020, 1, 20),
                6_900.0,
            ),
        ];

        rows.into_iter()
            .enumerate()
            .map(
                |(i, (name, oab, email, role, active, hired_on, salary))| StaffMember {
                    id: RecordId(i as u64 + 1),
                    name: name.to_string(),
                    oab: oab.map(str::to_string),
                    email: email.to_string(),
                    role,
                    active,
                    hired_on,
                    salary,
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
    fn search_by_oab_number() {
        let mut list = ListManager::with_records(SCHEMA, StaffMember::fixtures());
        list.set_search("oab/rj");
        let page = list.view();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].name, "Dr. Thiago Nunes");
    }

    #[test]
    fn interns_have_no_oab() {
        let mut list = ListManager::with_records(SCHEMA, StaffMember::fixtures());
        list.set_filter("role", StaffRole::Estagiario).unwrap();
        let page = list.view();
        assert_eq!(page.total, 2);
        assert!(page.items.iter().all(|s| s.field("oab") == Some(FieldValue::Empty)));
    }

    #[test]
    fn nine_members_span_two_pages() {
        let mut list = ListManager::with_records(SCHEMA, StaffMember::fixtures());
        assert_eq!(list.total_pages(), 2);
        assert!(list.next_page());
        assert_eq!(list.view().items.len(), 1);
    }

    #[test]
    fn blank_oab_clears_registration() {
        let mut member = StaffMember::fixtures().remove(0);
        member.set_field("oab", FieldValue::Empty).unwrap();
        assert_eq!(member.oab, None);
    }
}
