//! `mdlegal list`: print one page of an entity list

use anyhow::{bail, Context as _, Result};
use clap::builder::RangedU64ValueParser;
use clap::Parser;
use serde_json::json;

use mdlegal_core::entities::{finance, FinancialEntry};
use mdlegal_core::format::format_brl;
use mdlegal_core::pagination::MAX_PER_PAGE;
use mdlegal_core::{Entity, ListManager, Page};

use super::Context;
use crate::entity::{resolve_filter, EntityKind};
use crate::ui;

#[derive(Parser, Debug, Clone, Default)]
pub struct ListArgs {
    /// Entity page to list
    #[arg(value_enum)]
    pub entity: Option<EntityKind>,

    /// Free-text search over the searchable fields
    #[arg(long, short)]
    pub search: Option<String>,

    /// Categorical filter, repeatable (e.g. --filter status=Ativo)
    #[arg(long = "filter", short = 'f', value_name = "FIELD=VALUE")]
    pub filters: Vec<String>,

    /// Sort by field (ascending unless --desc)
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort descending
    #[arg(long, requires = "sort")]
    pub desc: bool,

    /// Page number (1-based)
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Rows per page, 1 to 100 (overrides config and entity default)
    #[arg(long, value_parser = page_size_parser())]
    pub page_size: Option<usize>,

    /// Print the page as JSON
    #[arg(long)]
    pub json: bool,
}

fn page_size_parser() -> RangedU64ValueParser<usize> {
    RangedU64ValueParser::new().range(1..=MAX_PER_PAGE as u64)
}

pub async fn run_list(args: ListArgs, ctx: &Context) -> Result<()> {
    let Some(kind) = args.entity else {
        for kind in EntityKind::ALL {
            let (name, title) =
                crate::with_entity!(kind, E => (E::schema().name, E::schema().title));
            println!("{:<10} {}", name, title);
        }
        return Ok(());
    };

    let output = match kind {
        EntityKind::Finance => {
            let (mut out, list) = list_page::<FinancialEntry>(&args, ctx).await?;
            if !args.json {
                out.push_str(&finance_summary(&list));
            }
            out
        }
        other => crate::with_entity!(other, E => list_page::<E>(&args, ctx).await?.0),
    };
    print!("{}", output);
    Ok(())
}

/// Load the entity, apply the view arguments and render the page
pub async fn list_page<E: Entity>(
    args: &ListArgs,
    ctx: &Context,
) -> Result<(String, ListManager<E>)> {
    let schema = E::schema();
    let mut list: ListManager<E> = ctx.list_manager(args.page_size);

    let service = ctx.service::<E>();
    ui::with_spinner_async(
        format!("Carregando {}...", schema.title),
        format!("{} carregado", schema.title),
        list.load_from(service),
    )
    .await
    .with_context(|| format!("Failed to load {}", schema.name))?;

    apply_view(&mut list, args)?;

    let page = list.view();
    let out = if args.json {
        format!("{}\n", page_json(&page)?)
    } else {
        ui::render_page(schema, &page)
    };
    Ok((out, list))
}

/// Apply search, filters, sort and page from the arguments
pub fn apply_view<E: Entity>(list: &mut ListManager<E>, args: &ListArgs) -> Result<()> {
    if let Some(term) = &args.search {
        list.set_search(term.as_str());
    }

    for filter in &args.filters {
        let (field, raw) = filter
            .split_once('=')
            .with_context(|| format!("expected FIELD=VALUE, got '{}'", filter))?;
        let value = resolve_filter(list, field.trim(), raw)?;
        list.set_filter(field.trim(), value)?;
    }

    if let Some(field) = &args.sort {
        list.click_sort(field)?;
        if args.desc {
            list.click_sort(field)?;
        }
    }

    if !list.goto_page(args.page) {
        bail!(
            "page {} out of range (1..={})",
            args.page,
            list.total_pages()
        );
    }
    Ok(())
}

fn page_json<E: Entity>(page: &Page<E>) -> Result<String> {
    let (first, last) = page.showing();
    let value = json!({
        "page": page.page,
        "per_page": page.per_page,
        "total": page.total,
        "total_pages": page.total_pages(),
        "has_prev": page.has_prev(),
        "has_next": page.has_next(),
        "showing": [first, last],
        "items": page.items,
    });
    serde_json::to_string_pretty(&value).context("Failed to serialize page")
}

/// Summary cards for the finance page, over every filtered row
pub fn finance_summary(list: &ListManager<FinancialEntry>) -> String {
    let rows = list.query().apply(list.schema(), list.records());
    let summary = finance::summarize(rows);
    format!(
        "\nReceitas: {}  Despesas: {}  Saldo: {}\nA receber: {}  Em atraso: {}\n",
        format_brl(summary.income),
        format_brl(summary.expenses),
        format_brl(summary.balance()),
        format_brl(summary.pending),
        format_brl(summary.overdue),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CliConfig;
    use mdlegal_core::entities::LegalCase;

    fn ctx() -> Context {
        Context::new(CliConfig::default(), true)
    }

    fn args(entity: EntityKind) -> ListArgs {
        ListArgs {
            entity: Some(entity),
            page: 1,
            ..ListArgs::default()
        }
    }

    #[tokio::test]
    async fn filters_and_sorts_cases() {
        let args = ListArgs {
            filters: vec!["status=ativo".to_string()],
            sort: Some("value".to_string()),
            desc: true,
            ..args(EntityKind::Cases)
        };
        let (out, list) = list_page::<LegalCase>(&args, &ctx()).await.unwrap();
        assert_eq!(list.filtered_count(), 7);
        assert!(out.contains("Mostrando 1–7 de 7"));
    }

    #[tokio::test]
    async fn json_output_has_paging_fields() {
        let args = ListArgs {
            page: 2,
            page_size: Some(5),
            json: true,
            ..args(EntityKind::Cases)
        };
        let (out, _) = list_page::<LegalCase>(&args, &ctx()).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["page"], 2);
        assert_eq!(value["total_pages"], 3);
        assert_eq!(value["items"].as_array().unwrap().len(), 5);
        assert_eq!(value["showing"], json!([6, 10]));
    }

    #[tokio::test]
    async fn page_out_of_range_is_an_error() {
        let args = ListArgs {
            page: 9,
            ..args(EntityKind::Cases)
        };
        let err = list_page::<LegalCase>(&args, &ctx()).await.unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }

    #[tokio::test]
    async fn unknown_sort_field_is_rejected() {
        let args = ListArgs {
            sort: Some("court".to_string()),
            ..args(EntityKind::Cases)
        };
        assert!(list_page::<LegalCase>(&args, &ctx()).await.is_err());
    }

    #[tokio::test]
    async fn finance_summary_covers_filtered_rows() {
        let args = ListArgs {
            filters: vec!["kind=Receita".to_string()],
            page_size: Some(2),
            ..args(EntityKind::Finance)
        };
        let (_, list) = list_page::<FinancialEntry>(&args, &ctx()).await.unwrap();
        let text = finance_summary(&list);
        assert!(text.contains("Receitas: R$ 22.500,00"));
        assert!(text.contains("Despesas: R$ 0,00"));
        assert!(text.contains("Em atraso: R$ 47.500,00"));
    }
}
