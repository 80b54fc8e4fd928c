//! Financeiro: receivables and payables

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{date, labelled_enum, label, number, text, ymd, Entity};
use crate::error::{ListError, Result};
use crate::record::{FieldKind, FieldValue, Record, RecordId};
use crate::schema::EntitySchema;

labelled_enum! {
    EntryKind {
        Receita => "Receita",
        Despesa => "Despesa",
    }
}

labelled_enum! {
    PaymentStatus {
        Pendente => "Pendente",
        Pago => "Pago",
        Atrasado => "Atrasado",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialEntry {
    pub id: RecordId,
    pub description: String,
    /// Client the entry is billed to or incurred for (may be the office itself)
    pub client: String,
    pub category: String,
    pub kind: EntryKind,
    pub status: PaymentStatus,
    pub due_on: NaiveDate,
    pub amount: f64,
}

pub const SCHEMA: EntitySchema = EntitySchema {
    name: "finance",
    title: "Financeiro",
    fields: &[
        ("description", FieldKind::Text),
        ("client", FieldKind::Text),
        ("category", FieldKind::Text),
        ("kind", FieldKind::Text),
        ("status", FieldKind::Text),
        ("due_on", FieldKind::Date),
        ("amount", FieldKind::Money),
    ],
    searchable: &["description", "client", "category"],
    filterable: &["kind", "status"],
    sortable: &["description", "due_on", "amount"],
    page_size: 10,
};

impl Record for FinancialEntry {
    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        Some(match name {
            "description" => self.description.as_str().into(),
            "client" => self.client.as_str().into(),
            "category" => self.category.as_str().into(),
            "kind" => self.kind.into(),
            "status" => self.status.into(),
            "due_on" => self.due_on.into(),
            "amount" => self.amount.into(),
            _ => return None,
        })
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> Result<()> {
        match name {
            "description" => self.description = text(name, value)?,
            "client" => self.client = text(name, value)?,
            "category" => self.category = text(name, value)?,
            "kind" => self.kind = label(name, value)?,
            "status" => self.status = label(name, value)?,
            "due_on" => self.due_on = date(name, value)?,
            "amount" => self.amount = number(name, value)?,
            _ => return Err(ListError::unknown_field(SCHEMA.name, name)),
        }
        Ok(())
    }
}

/// Totals shown on the financial summary cards
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct FinancialSummary {
    pub income: f64,
    pub expenses: f64,
    pub pending: f64,
    pub overdue: f64,
}

impl FinancialSummary {
    pub fn balance(&self) -> f64 {
        self.income - self.expenses
    }
}

/// Summarize paid income/expenses and open receivables
pub fn summarize<'a, I>(entries: I) -> FinancialSummary
where
    I: IntoIterator<Item = &'a FinancialEntry>,
{
    entries
        .into_iter()
        .fold(FinancialSummary::default(), |mut acc, entry| {
            match (entry.kind, entry.status) {
                (EntryKind::Receita, PaymentStatus::Pago) => acc.income += entry.amount,
                (EntryKind::Despesa, PaymentStatus::Pago) => acc.expenses += entry.amount,
                (EntryKind::Receita, PaymentStatus::Pendente) => acc.pending += entry.amount,
                (EntryKind::Receita, PaymentStatus::Atrasado) => acc.overdue += entry.amount,
                (EntryKind::Despesa, _) => {}
            }
            acc
        })
}

impl Entity for FinancialEntry {
    fn schema() -> &'static EntitySchema {
        &SCHEMA
    }

    fn fixtures() -> Vec<Self> {
        use EntryKind::*;
        use PaymentStatus::*;
        let rows = [
            (
                "Honorários - ação de cobrança",
                "João Silva",
                "Honorários",
                Receita,
                Pago,
                ymd(2024, 5, 10),
                4_500.0,
            ),
            (
                "Honorários - reclamação trabalhista",
                "Ana Costa",
                "Honorários",
                Receita,
                Pendente,
                ymd(2024, 6, 15),
                8_250.0,
            ),
            (
                "Consultoria tributária mensal",
                "Construtora Horizonte Ltda",
                "Consultoria",
                Receita,
                Pago,
                ymd(2024, 5, 5),
                12_000.0,
            ),
            (
                "Aluguel do escritório",
                "MD Legal",
                "Infraestrutura",
                Despesa,
                Pago,
                ymd(2024, 5, 5),
                7_800.0,
            ),
            (
                "Custas processuais",
                "Fernanda Lima",
                "Custas",
                Despesa,
                Pago,
                ymd(2024, 4, 22),
                1_350.75,
            ),
            (
                "Honorários de êxito",
                "Família Rodrigues",
                "Honorários",
                Receita,
                Atrasado,
                ymd(2024, 3, 30),
                47_500.0,
            ),
            (
                "Licença do software jurídico",
                "MD Legal",
                "Tecnologia",
                Despesa,
                Pendente,
                ymd(2024, 6, 1),
                890.0,
            ),
            (
                "Consultoria contratual",
                "Distribuidora Norte S.A.",
                "Consultoria",
                Receita,
                Pendente,
                ymd(2024, 6, 20),
                15_000.0,
            ),
            (
                "Perícia contábil",
                "Comercial Santos ME",
                "Custas",
                Despesa,
                Pago,
                ymd(2024, 5, 18),
                3_200.0,
            ),
            (
                "Honorários - guarda compartilhada",
                "Patrícia Souza",
                "Honorários",
                Receita,
                Pago,
                ymd(2024, 5, 28),
                6_000.0,
            ),
            (
                "Folha de pagamento",
                "MD Legal",
                "Pessoal",
                Despesa,
                Pago,
                ymd(2024, 5, 30),
                113_900.0,
            ),
        ];

        rows.into_iter()
            .enumerate()
            .map(
                |(i, (description, client, category, kind, status, due_on, amount))| {
                    FinancialEntry {
                        id: RecordId(i as u64 + 1),
                        description: description.to_string(),
                        client: client.to_string(),
                        category: category.to_string(),
                        kind,
                        status,
                        due_on,
                        amount,
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
    fn summary_over_fixtures() {
        let summary = summarize(&FinancialEntry::fixtures());
        assert_eq!(summary.income, 22_500.0);
        assert_eq!(summary.expenses, 126_250.75);
        assert_eq!(summary.pending, 23_250.0);
        assert_eq!(summary.overdue, 47_500.0);
        assert!(summary.balance() < 0.0);
    }

    #[test]
    fn summary_follows_filtered_view() {
        let mut list = ListManager::with_records(SCHEMA, FinancialEntry::fixtures());
        list.set_search("honorários");
        let page = list.view();
        let summary = summarize(&page.items);
        assert_eq!(summary.income, 10_500.0);
        assert_eq!(summary.expenses, 0.0);
    }

    #[test]
    fn amount_accepts_brazilian_notation() {
        let mut entry = FinancialEntry::default();
        let value = FieldValue::parse("amount", FieldKind::Money, "R$ 1.350,75").unwrap();
        entry.set_field("amount", value).unwrap();
        assert_eq!(entry.amount, 1_350.75);
    }
}
