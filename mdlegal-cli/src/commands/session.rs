//! `mdlegal session`: drive one list page with line commands from stdin
//!
//! Every line is one command (`search`, `filter`, `sort`, `next`, `new`,
//! `edit`, `delete`, ...). Errors are reported and the session continues,
//! the way a page shows a toast and stays usable.

use std::io::{BufRead, Write};
use std::sync::Arc;

use anyhow::{anyhow, bail, Context as _, Result};
use clap::Parser;
use tracing::debug;

use mdlegal_core::{Entity, ListManager, MockService, RecordId};

use super::Context;
use crate::entity::{parse_assignment, resolve_filter, EntityKind};
use crate::ui;

#[derive(Parser, Debug)]
pub struct SessionArgs {
    /// Entity page to open
    #[arg(value_enum)]
    pub entity: EntityKind,
}

pub const HELP: &str = "\
Comandos:
  show                      mostrar a página atual
  search [termo]            buscar (vazio limpa a busca)
  filter <campo> <valor>    filtrar por um campo categórico
  unfilter [campo]          remover um filtro (ou todos e a busca)
  sort <campo>              ordenar; repetir inverte a direção
  next | prev | first | last | page <n>
  get <id>                  mostrar um registro em JSON
  new campo=valor ...       criar registro
  edit <id> campo=valor ... editar registro
  delete <id>               remover registro
  reload                    recarregar do serviço
  state                     estado de carregamento
  help | quit";

/// Result of one session command
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Text(String),
    Quit,
}

/// One open list page backed by the mock service
pub struct Session<E: Entity> {
    list: ListManager<E>,
    service: Arc<MockService<E>>,
}

impl<E: Entity> Session<E> {
    pub fn new(ctx: &Context, page_size: Option<usize>) -> Self {
        Self {
            list: ctx.list_manager(page_size),
            service: ctx.service::<E>(),
        }
    }

    pub fn list(&self) -> &ListManager<E> {
        &self.list
    }

    /// Load from the service with a spinner
    pub async fn load(&mut self) -> Result<String> {
        let schema = E::schema();
        ui::with_spinner_async(
            format!("Carregando {}...", schema.title),
            format!("{} carregado", schema.title),
            self.list.load_from(self.service.clone()),
        )
        .await
        .with_context(|| format!("Failed to load {}", schema.name))?;
        Ok(self.render())
    }

    /// Current page with the active search, filters and sort
    pub fn render(&self) -> String {
        let schema = E::schema();
        let query = self.list.query();
        let mut header = format!("== {} ==", schema.title);
        if !query.search.trim().is_empty() {
            header.push_str(&format!(" busca: '{}'", query.search.trim()));
        }
        for (field, value) in &query.filters {
            header.push_str(&format!(" {}={}", field, value));
        }
        if let Some(sort) = self.list.sort() {
            header.push_str(&format!(" ordem: {} {}", sort.field, sort.direction.arrow()));
        }
        format!("{}\n{}", header, ui::render_page(schema, &self.list.view()))
    }

    fn parse_id(raw: Option<&String>) -> Result<RecordId> {
        let raw = raw.ok_or_else(|| anyhow!("missing record id"))?;
        raw.parse::<RecordId>()
            .map_err(|_| anyhow!("invalid record id '{}'", raw))
    }

    /// Apply `field=value` assignments to the open draft; closes it on error
    fn fill_draft(&mut self, assignments: &[String]) -> Result<()> {
        let schema = *E::schema();
        for input in assignments {
            let applied = parse_assignment(&schema, input)
                .and_then(|(field, value)| Ok(self.list.edit_draft(&field, value)?));
            if let Err(err) = applied {
                self.list.take_draft();
                return Err(err);
            }
        }
        Ok(())
    }

    /// Execute one command line
    pub async fn execute(&mut self, line: &str) -> Result<Reply> {
        let words =
            shlex::split(&escape_hash_words(line)).ok_or_else(|| anyhow!("unbalanced quotes"))?;
        let Some((command, rest)) = words.split_first() else {
            return Ok(Reply::Text(String::new()));
        };
        debug!(command = command.as_str(), args = rest.len(), "session command");

        let list = &mut self.list;
        match command.as_str() {
            "help" | "?" => return Ok(Reply::Text(HELP.to_string())),
            "quit" | "exit" | "sair" => return Ok(Reply::Quit),
            "show" | "ls" => {}
            "search" => list.set_search(rest.join(" ")),
            "filter" => {
                let [field, value @ ..] = rest else {
                    bail!("usage: filter <field> <value>");
                };
                if value.is_empty() {
                    bail!("usage: filter <field> <value>");
                }
                let value = resolve_filter(list, field, &value.join(" "))?;
                list.set_filter(field, value)?;
            }
            "unfilter" => match rest.first() {
                Some(field) => list.clear_filter(field),
                None => list.clear_filters(),
            },
            "sort" => {
                let field = rest.first().ok_or_else(|| anyhow!("usage: sort <field>"))?;
                list.click_sort(field)?;
            }
            "next" => {
                if !list.next_page() {
                    bail!("already on the last page");
                }
            }
            "prev" => {
                if !list.prev_page() {
                    bail!("already on the first page");
                }
            }
            "first" => list.first_page(),
            "last" => list.last_page(),
            "page" => {
                let n: usize = rest
                    .first()
                    .ok_or_else(|| anyhow!("usage: page <n>"))?
                    .parse()
                    .context("page must be a number")?;
                if !list.goto_page(n) {
                    bail!("page {} out of range (1..={})", n, list.total_pages());
                }
            }
            "get" => {
                let id = Self::parse_id(rest.first())?;
                let record = list.get(id).ok_or_else(|| anyhow!("record {} not found", id))?;
                let json =
                    serde_json::to_string_pretty(record).context("Failed to serialize record")?;
                return Ok(Reply::Text(json));
            }
            "new" => {
                list.open_create(E::default());
                self.fill_draft(rest)?;
                let created = self.list.commit_draft_with(self.service.as_ref()).await?;
                return Ok(Reply::Text(format!("criado #{}\n{}", created.id(), self.render())));
            }
            "edit" => {
                let id = Self::parse_id(rest.first())?;
                list.open_edit(id)?;
                self.fill_draft(&rest[1..])?;
                let updated = self.list.commit_draft_with(self.service.as_ref()).await?;
                return Ok(Reply::Text(format!("atualizado #{}\n{}", updated.id(), self.render())));
            }
            "delete" | "rm" => {
                let id = Self::parse_id(rest.first())?;
                self.list.delete_with(self.service.as_ref(), id).await?;
                return Ok(Reply::Text(format!("removido #{}\n{}", id, self.render())));
            }
            "reload" => return self.load().await.map(Reply::Text),
            "state" => return Ok(Reply::Text(format!("{:?}", list.load_state()))),
            other => bail!("unknown command '{}' (try 'help')", other),
        }

        Ok(Reply::Text(self.render()))
    }
}

/// Escape `#` at the start of an unquoted word so shlex keeps `#13` instead
/// of reading it as a comment
fn escape_hash_words(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let (mut single, mut double, mut escaped) = (false, false, false);
    let mut word_start = true;
    for c in line.chars() {
        if escaped {
            escaped = false;
        } else if single {
            single = c != '\'';
        } else if double {
            match c {
                '\\' => escaped = true,
                '"' => double = false,
                _ => {}
            }
        } else {
            match c {
                '\\' => escaped = true,
                '\'' => single = true,
                '"' => double = true,
                '#' if word_start => out.push('\\'),
                _ => {}
            }
        }
        word_start = !single && !double && !escaped && c.is_whitespace();
        out.push(c);
    }
    out
}

pub async fn run_session(args: SessionArgs, ctx: &Context) -> Result<()> {
    crate::with_entity!(args.entity, E => run_session_for::<E>(ctx).await)
}

async fn run_session_for<E: Entity>(ctx: &Context) -> Result<()> {
    let mut session = Session::<E>::new(ctx, None);
    let mut stdout = std::io::stdout();
    writeln!(stdout, "{}", session.load().await?)?;

    for line in std::io::stdin().lock().lines() {
        let line = line.context("Failed to read stdin")?;
        match session.execute(&line).await {
            Ok(Reply::Quit) => break,
            Ok(Reply::Text(text)) if text.is_empty() => {}
            Ok(Reply::Text(text)) => writeln!(stdout, "{}", text)?,
            Err(err) => writeln!(stdout, "erro: {}", err)?,
        }
        stdout.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CliConfig;
    use mdlegal_core::entities::{CaseStatus, LegalCase};

    async fn cases() -> Session<LegalCase> {
        let ctx = Context::new(CliConfig::default(), true);
        let mut session = Session::new(&ctx, None);
        session.load().await.unwrap();
        session
    }

    fn text(reply: Reply) -> String {
        match reply {
            Reply::Text(text) => text,
            Reply::Quit => panic!("unexpected quit"),
        }
    }

    #[tokio::test]
    async fn search_filter_and_sort() {
        let mut session = cases().await;
        let out = text(session.execute("filter status ativo").await.unwrap());
        assert!(out.contains("status=Ativo"));
        assert_eq!(session.list().filtered_count(), 7);

        let out = text(session.execute("sort value").await.unwrap());
        assert!(out.contains("ordem: value ↑"));
        let out = text(session.execute("sort value").await.unwrap());
        assert!(out.contains("ordem: value ↓"));

        session.execute("unfilter").await.unwrap();
        assert_eq!(session.list().filtered_count(), 12);
    }

    #[tokio::test]
    async fn paging_refuses_past_the_end() {
        let mut session = cases().await;
        session.execute("next").await.unwrap();
        assert_eq!(session.list().page(), 2);
        assert!(session.execute("next").await.is_err());
        assert!(session.execute("page 7").await.is_err());
        session.execute("first").await.unwrap();
        assert!(session.execute("prev").await.is_err());
    }

    #[tokio::test]
    async fn create_edit_delete_through_drafts() {
        let mut session = cases().await;
        let out = text(
            session
                .execute("new title='Revisional de aluguel' client='Ana Costa' value=1.500,00")
                .await
                .unwrap(),
        );
        assert!(out.starts_with("criado #13"));

        session.execute("edit 13 status=suspenso").await.unwrap();
        let record = session.list().get(RecordId(13)).unwrap();
        assert_eq!(record.status, CaseStatus::Suspenso);
        assert_eq!(record.value, 1500.0);

        let out = text(session.execute("delete #13").await.unwrap());
        assert!(out.starts_with("removido #13"));
        assert!(session.execute("delete 13").await.is_err());
        assert_eq!(session.list().records().len(), 12);
    }

    #[test]
    fn hash_ids_survive_word_splitting() {
        let split = |line: &str| shlex::split(&escape_hash_words(line)).unwrap();
        assert_eq!(split("delete #13"), vec!["delete", "#13"]);
        assert_eq!(split("#2"), vec!["#2"]);
        assert_eq!(split("search 'sala #3'"), vec!["search", "sala #3"]);
        assert_eq!(split("new title=\"Ação #1\""), vec!["new", "title=Ação #1"]);
        assert_eq!(split("get a#1"), vec!["get", "a#1"]);
    }

    #[tokio::test]
    async fn bad_assignment_closes_the_draft() {
        let mut session = cases().await;
        assert!(session.execute("new value=abc").await.is_err());
        assert!(!session.list().draft().is_open());
        assert!(session.execute("edit 1 color=red").await.is_err());
        assert!(!session.list().draft().is_open());
        assert_eq!(session.list().records().len(), 12);
    }

    #[tokio::test]
    async fn help_quit_and_unknown() {
        let mut session = cases().await;
        assert!(text(session.execute("help").await.unwrap()).contains("Comandos"));
        assert_eq!(session.execute("quit").await.unwrap(), Reply::Quit);
        assert!(session.execute("frobnicate").await.is_err());
        assert!(session.execute("search 'unterminated").await.is_err());
        assert_eq!(session.execute("   ").await.unwrap(), Reply::Text(String::new()));
    }

    #[tokio::test]
    async fn get_prints_json() {
        let mut session = cases().await;
        let out = text(session.execute("get 1").await.unwrap());
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["id"], 1);
        assert!(session.execute("get 99").await.is_err());
    }
}
