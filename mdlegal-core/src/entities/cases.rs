//! Processos: legal cases tracked by the office

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{date, labelled_enum, label, number, text, ymd, Entity};
use crate::error::{ListError, Result};
use crate::record::{FieldKind, FieldValue, Record, RecordId};
use crate::schema::EntitySchema;

labelled_enum! {
    /// Procedural status of a case
    CaseStatus {
        Ativo => "Ativo",
        Suspenso => "Suspenso",
        Arquivado => "Arquivado",
        Encerrado => "Encerrado",
    }
}

labelled_enum! {
    /// Area of law
    PracticeArea {
        Civil => "Cível",
        Trabalhista => "Trabalhista",
        Tributario => "Tributário",
        Familia => "Família",
        Criminal => "Criminal",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegalCase {
    pub id: RecordId,
    /// CNJ case number
    pub number: String,
    pub title: String,
    pub client: String,
    pub court: String,
    pub area: PracticeArea,
    pub status: CaseStatus,
    pub opened_on: NaiveDate,
    /// Amount in dispute (valor da causa)
    pub value: f64,
}

pub const SCHEMA: EntitySchema = EntitySchema {
    name: "cases",
    title: "Processos",
    fields: &[
        ("number", FieldKind::Text),
        ("title", FieldKind::Text),
        ("client", FieldKind::Text),
        ("court", FieldKind::Text),
        ("area", FieldKind::Text),
        ("status", FieldKind::Text),
        ("opened_on", FieldKind::Date),
        ("value", FieldKind::Money),
    ],
    searchable: &["number", "title", "client", "court"],
    filterable: &["status", "area"],
    sortable: &["number", "title", "client", "opened_on", "value"],
    page_size: 10,
};

impl Record for LegalCase {
    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        Some(match name {
            "number" => self.number.as_str().into(),
            "title" => self.title.as_str().into(),
            "client" => self.client.as_str().into(),
            "court" => self.court.as_str().into(),
            "area" => self.area.into(),
            "status" => self.status.into(),
            "opened_on" => self.opened_on.into(),
            "value" => self.value.into(),
            _ => return None,
        })
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> Result<()> {
        match name {
            "number" => self.number = text(name, value)?,
            "title" => self.title = text(name, value)?,
            "client" => self.client = text(name, value)?,
            "court" => self.court = text(name, value)?,
            "area" => self.area = label(name, value)?,
            "status" => self.status = label(name, value)?,
            "opened_on" => self.opened_on = date(name, value)?,
            "value" => self.value = number(name, value)?,
            _ => return Err(ListError::unknown_field(SCHEMA.name, name)),
        }
        Ok(())
    }
}

impl Entity for LegalCase {
    fn schema() -> &'static EntitySchema {
        &SCHEMA
    }

    fn fixtures() -> Vec<Self> {
        let case = |id: u64,
                    number: &str,
                    title: &str,
                    client: &str,
                    court: &str,
                    area: PracticeArea,
                    status: CaseStatus,
                    opened_on: NaiveDate,
                    value: f64| LegalCase {
            id: RecordId(id),
            number: number.to_string(),
            title: title.to_string(),
            client: client.to_string(),
            court: court.to_string(),
            area,
            status,
            opened_on,
            value,
        };

        use CaseStatus::*;
        use PracticeArea::*;
        vec![
            case(
                1,
                "0001234-56.2023.8.26.0100",
                "Ação de cobrança",
                "João Silva",
                "TJSP - 3ª Vara Cível",
                Civil,
                Ativo,
                ymd(2023, 3, 14),
                45_000.0,
            ),
            case(
                2,
                "0002345-67.2023.5.02.0011",
                "Reclamação trabalhista",
                "Ana Costa",
                "TRT-2 - 11ª Vara do Trabalho",
                Trabalhista,
                Ativo,
                ymd(2023, 5, 2),
                82_500.0,
            ),
            case(
                3,
                "0003456-78.2022.4.03.6100",
                "Mandado de segurança - ICMS",
                "Construtora Horizonte Ltda",
                "TRF-3 - 5ª Vara Federal",
                Tributario,
                Suspenso,
                ymd(2022, 11, 21),
                310_000.0,
            ),
            case(
                4,
                "0004567-89.2024.8.26.0002",
                "Divórcio consensual",
                "Mariana Oliveira",
                "TJSP - 1ª Vara de Família",
                Familia,
                Encerrado,
                ymd(2024, 1, 9),
                0.0,
            ),
            case(
                5,
                "0005678-90.2021.8.26.0050",
                "Defesa em ação penal",
                "Carlos Pereira",
                "TJSP - 2ª Vara Criminal",
                Criminal,
                Arquivado,
                ymd(2021, 8, 30),
                0.0,
            ),
            case(
                6,
                "0006789-01.2024.8.26.0100",
                "Indenização por danos morais",
                "Fernanda Lima",
                "TJSP - 7ª Vara Cível",
                Civil,
                Ativo,
                ymd(2024, 2, 18),
                30_000.0,
            ),
            case(
                7,
                "0007890-12.2023.5.02.0045",
                "Horas extras e adicional noturno",
                "Roberto Alves",
                "TRT-2 - 45ª Vara do Trabalho",
                Trabalhista,
                Ativo,
                ymd(2023, 9, 12),
                56_300.0,
            ),
            case(
                8,
                "0008901-23.2024.8.26.0068",
                "Guarda compartilhada",
                "Patrícia Souza",
                "TJSP - 2ª Vara de Família",
                Familia,
                Ativo,
                ymd(2024, 4, 3),
                0.0,
            ),
            case(
                9,
                "0009012-34.2022.4.03.6182",
                "Execução fiscal - embargos",
                "Comercial Santos ME",
                "TRF-3 - 1ª Vara de Execuções Fiscais",
                Tributario,
                Ativo,
                ymd(2022, 6, 27),
                128_750.5,
            ),
            case(
                10,
                "0010123-45.2023.8.26.0100",
                "Revisão contratual",
                "Distribuidora Norte S.A.",
                "TJSP - 12ª Vara Cível",
                Civil,
                Suspenso,
                ymd(2023, 12, 5),
                215_000.0,
            ),
            case(
                11,
                "0011234-56.2024.5.02.0003",
                "Rescisão indireta",
                "Juliana Martins",
                "TRT-2 - 3ª Vara do Trabalho",
                Trabalhista,
                Ativo,
                ymd(2024, 6, 19),
                41_200.0,
            ),
            case(
                12,
                "0012345-67.2020.8.26.0011",
                "Inventário",
                "Família Rodrigues",
                "TJSP - Vara de Sucessões",
                Familia,
                Encerrado,
                ymd(2020, 10, 8),
                950_000.0,
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list_manager::ListManager;

    #[test]
    fn filter_by_status_label() {
        let mut list = ListManager::with_records(SCHEMA, LegalCase::fixtures());
        list.set_filter("status", CaseStatus::Ativo).unwrap();
        let page = list.view();
        assert_eq!(page.total, 7);
        assert!(page.items.iter().all(|c| c.status == CaseStatus::Ativo));
    }

    #[test]
    fn search_matches_case_number() {
        let mut list = ListManager::with_records(SCHEMA, LegalCase::fixtures());
        list.set_search("2023.5.02");
        let ids: Vec<u64> = list.view().items.iter().map(|c| c.id.0).collect();
        assert_eq!(ids, vec![2, 7]);
    }

    #[test]
    fn sort_by_value_descending() {
        let mut list = ListManager::with_records(SCHEMA, LegalCase::fixtures());
        list.click_sort("value").unwrap();
        list.click_sort("value").unwrap();
        assert_eq!(list.view().items[0].client, "Família Rodrigues");
    }

    #[test]
    fn rejects_unknown_status() {
        let mut case = LegalCase::default();
        let err = case
            .set_field("status", FieldValue::from("Perdido"))
            .unwrap_err();
        assert!(matches!(err, ListError::InvalidValue { .. }));
    }
}
