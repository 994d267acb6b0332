use super::GlobalArgs;
use crate::client::ApiClient;
use crate::lifecycle::Liveness;
use crate::model::{Rule, RuleDraft, RuleField, RuleId};
use crate::notify::StdoutNotifier;
use crate::rules::RuleEngine;
use anyhow::Result;
use clap::{Args, Subcommand};
use std::sync::Arc;

#[derive(Args, Debug)]
pub struct RulesArgs {
    #[command(subcommand)]
    pub command: RulesCommand,
}

#[derive(Subcommand, Debug)]
pub enum RulesCommand {
    /// List all rules
    List {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Add a rule
    Add(AddRuleArgs),

    /// Delete rules by id
    Delete {
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

#[derive(Args, Debug, Default)]
pub struct AddRuleArgs {
    #[arg(long)]
    pub source_ip: Option<String>,
    #[arg(long)]
    pub destination_ip: Option<String>,
    #[arg(long)]
    pub source_port: Option<String>,
    #[arg(long)]
    pub destination_port: Option<String>,
    #[arg(long)]
    pub protocol: Option<String>,
    #[arg(long)]
    pub state: Option<String>,
    #[arg(long)]
    pub action: Option<String>,
    #[arg(long)]
    pub rate_limit: Option<String>,
    #[arg(long)]
    pub limit_window: Option<String>,
    /// true or false
    #[arg(long)]
    pub log_action: Option<String>,
}

impl AddRuleArgs {
    /// Missing flags become empty fields so the required-field check reports them.
    pub fn to_draft(&self) -> RuleDraft {
        let mut draft = RuleDraft::default();
        let values = [
            (RuleField::SourceIp, &self.source_ip),
            (RuleField::DestinationIp, &self.destination_ip),
            (RuleField::SourcePort, &self.source_port),
            (RuleField::DestinationPort, &self.destination_port),
            (RuleField::Protocol, &self.protocol),
            (RuleField::State, &self.state),
            (RuleField::Action, &self.action),
            (RuleField::RateLimit, &self.rate_limit),
            (RuleField::LimitWindow, &self.limit_window),
            (RuleField::LogAction, &self.log_action),
        ];
        for (field, value) in values {
            if let Some(value) = value {
                draft.set_field(field, value.as_str());
            }
        }
        draft
    }
}

pub async fn run(args: RulesArgs, global: GlobalArgs) -> Result<()> {
    let config = global.load_config()?;
    super::init_cli_logging(&config)?;

    let client = Arc::new(ApiClient::from_config(&config.backend)?);
    let engine = RuleEngine::new(client, Arc::new(StdoutNotifier), Liveness::new());

    match args.command {
        RulesCommand::List { format } => {
            engine.fetch_all().await?;
            let rules = engine.rules();
            match format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&rules)?),
                "text" => print_rules(&rules),
                _ => anyhow::bail!("Invalid format: {}. Use 'text' or 'json'", format),
            }
        }
        RulesCommand::Add(add) => {
            engine.create(&add.to_draft()).await?;
            println!("{} rule(s) on the backend", engine.rules().len());
        }
        RulesCommand::Delete { ids } => {
            let ids: Vec<RuleId> = ids.into_iter().map(RuleId::new).collect();
            engine.delete_many(&ids).await?;
            println!("{} rule(s) on the backend", engine.rules().len());
        }
    }

    Ok(())
}

pub fn format_rules(rules: &[Rule]) -> Vec<String> {
    let mut header = vec!["ID".to_string()];
    header.extend(RuleField::FORM_ORDER.iter().map(|f| f.label().to_string()));

    let mut rows = vec![header];
    for rule in rules {
        let mut row = vec![rule.id.to_string()];
        row.extend(RuleField::FORM_ORDER.iter().map(|f| rule.field_text(*f)));
        rows.push(row);
    }

    let columns = rows[0].len();
    let widths: Vec<usize> = (0..columns)
        .map(|i| rows.iter().map(|row| row[i].chars().count()).max().unwrap_or(0))
        .collect();

    rows.iter()
        .map(|row| {
            row.iter()
                .zip(&widths)
                .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        })
        .collect()
}

fn print_rules(rules: &[Rule]) {
    if rules.is_empty() {
        println!("No rules configured");
        return;
    }
    for line in format_rules(rules) {
        println!("{}", line);
    }
}
