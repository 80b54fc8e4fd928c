//! Suporte: internal activity and support tickets

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{date, labelled_enum, label, text, ymd, Entity};
use crate::error::{ListError, Result};
use crate::record::{FieldKind, FieldValue, Record, RecordId};
use crate::schema::EntitySchema;

labelled_enum! {
    TicketStatus {
        Aberto => "Aberto",
        EmAndamento => "Em andamento",
        Resolvido => "Resolvido",
        Fechado => "Fechado",
    }
}

labelled_enum! {
    TicketPriority {
        Baixa => "Baixa",
        Media => "Média",
        Alta => "Alta",
        Urgente => "Urgente",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupportTicket {
    pub id: RecordId,
    pub title: String,
    pub requester: String,
    pub description: String,
    pub status: TicketStatus,
    pub priority: TicketPriority,
    pub opened_on: NaiveDate,
}

pub const SCHEMA: EntitySchema = EntitySchema {
    name: "tickets",
    title: "Suporte",
    fields: &[
        ("title", FieldKind::Text),
        ("requester", FieldKind::Text),
        ("description", FieldKind::Text),
        ("status", FieldKind::Text),
        ("priority", FieldKind::Text),
        ("opened_on", FieldKind::Date),
    ],
    searchable: &["title", "requester", "description"],
    filterable: &["status", "priority"],
    sortable: &["title", "status", "opened_on"],
    page_size: 10,
};

impl Record for SupportTicket {
    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        Some(match name {
            "title" => self.title.as_str().into(),
            "requester" => self.requester.as_str().into(),
            "description" => self.description.as_str().into(),
            "status" => self.status.into(),
            "priority" => self.priority.into(),
            "opened_on" => self.opened_on.into(),
            _ => return None,
        })
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> Result<()> {
        match name {
            "title" => self.title = text(name, value)?,
            "requester" => self.requester = text(name, value)?,
            "description" => self.description = text(name, value)?,
            "status" => self.status = label(name, value)?,
            "priority" => self.priority = label(name, value)?,
            "opened_on" => self.opened_on = date(name, value)?,
            _ => return Err(ListError::unknown_field(SCHEMA.name, name)),
        }
        Ok(())
    }
}

impl Entity for SupportTicket {
    fn schema() -> &'static EntitySchema {
        &SCHEMA
    }

    fn fixtures() -> Vec<Self> {
        use TicketPriority::*;
        use TicketStatus::*;
        let rows = [
            (
                "Erro ao gerar relatório mensal",
                "Renata Barbosa",
                "Exportação trava ao incluir lançamentos de maio",
                Aberto,
                Alta,
                ymd(2024, 6, 3),
            ),
            (
                "Acesso ao e-SAJ expirado",
                "Dra. Beatriz Ramos",
                "Certificado digital vencido no computador da sala 2",
                EmAndamento,
                Urgente,
                ymd(2024, 6, 4),
            ),
            (
                "Impressora do 2º andar",
                "Cláudia Mendes",
                "Atolamento frequente de papel",
                Resolvido,
                Baixa,
                ymd(2024, 5, 20),
            ),
            (
                "Cadastro duplicado de cliente",
                "Dr. Lucas Ferreira",
                "Ana Costa aparece duas vezes na busca",
                Aberto,
                Media,
                ymd(2024, 6, 1),
            ),
            (
                "Prazo não exibido na agenda",
                "Dra. Maria Duarte",
                "Intimação publicada não gerou prazo",
                EmAndamento,
                Alta,
                ymd(2024, 5, 29),
            ),
            (
                "Solicitar novo notebook",
                "Gabriela Teixeira",
                "Equipamento para estagiária",
                Fechado,
                Baixa,
                ymd(2024, 2, 12),
            ),
            (
                "Backup semanal falhou",
                "Renata Barbosa",
                "Rotina de sábado terminou com erro",
                Resolvido,
                Alta,
                ymd(2024, 5, 25),
            ),
        ];

        rows.into_iter()
            .enumerate()
            .map(
                |(i, (title, requester, description, status, priority, opened_on))| {
                    SupportTicket {
                        id: RecordId(i as u64 + 1),
                        title: title.to_string(),
                        requester: requester.to_string(),
                        description: description.to_string(),
                        status,
                        priority,
                        opened_on,
                    }
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
    fn open_high_priority() {
        let mut list = ListManager::with_records(SCHEMA, SupportTicket::fixtures());
        list.set_filter("priority", TicketPriority::Alta).unwrap();
        assert_eq!(list.filtered_count(), 3);
        list.set_filter("status", TicketStatus::Aberto).unwrap();
        assert_eq!(list.view().items[0].id, RecordId(1));
    }

    #[test]
    fn newest_first() {
        let mut list = ListManager::with_records(SCHEMA, SupportTicket::fixtures());
        list.click_sort("opened_on").unwrap();
        list.click_sort("opened_on").unwrap();
        assert_eq!(list.view().items[0].title, "Acesso ao e-SAJ expirado");
    }

    #[test]
    fn priority_parses_without_accent() {
        let mut ticket = SupportTicket::default();
        ticket
            .set_field("priority", FieldValue::from("media"))
            .unwrap();
        assert_eq!(ticket.priority, TicketPriority::Media);
    }
}
