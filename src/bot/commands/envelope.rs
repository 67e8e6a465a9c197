//! Envelope Discord commands - list, show, intake, edit and summary.
//!
//! Envelopes are job tickets and are never deleted from the bot; a finished
//! job is marked delivered instead.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            Context,
            commands::{EMBED_COLOR, MAX_LIST_LINES, parse_date, parse_date_change, short_id},
            handlers::autocomplete,
        },
        core::{envelope, kind::Envelopes, report},
        entities::{EntityKind, EnvelopeModel, EnvelopeStatus, ServiceType},
        errors::{Error, Result},
        views::{FormView, ListView, Notification, SubmitOutcome},
    };
    use poise::serenity_prelude as serenity;
    use std::fmt::Write;
    use tracing::info;

    #[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
    pub enum StatusChoice {
        #[name = "Pending"]
        Pending,
        #[name = "In progress"]
        InProgress,
        #[name = "Completed"]
        Completed,
        #[name = "Delivered"]
        Delivered,
    }

    impl From<StatusChoice> for EnvelopeStatus {
        fn from(choice: StatusChoice) -> Self {
            match choice {
                StatusChoice::Pending => Self::Pending,
                StatusChoice::InProgress => Self::InProgress,
                StatusChoice::Completed => Self::Completed,
                StatusChoice::Delivered => Self::Delivered,
            }
        }
    }

    #[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
    pub enum ServiceChoice {
        #[name = "Repair"]
        Repair,
        #[name = "Engraving"]
        Engraving,
    }

    impl From<ServiceChoice> for ServiceType {
        fn from(choice: ServiceChoice) -> Self {
            match choice {
                ServiceChoice::Repair => Self::Repair,
                ServiceChoice::Engraving => Self::Engraving,
            }
        }
    }

    /// Manage repair and engraving envelopes.
    #[poise::command(
        slash_command,
        subcommands(
            "envelope_list",
            "envelope_show",
            "envelope_new",
            "envelope_edit",
            "envelope_stats"
        ),
        subcommand_required
    )]
    pub async fn envelope(_ctx: Context<'_>) -> Result<()> {
        Ok(())
    }

    /// Lists envelopes, newest first, with optional filters.
    #[poise::command(slash_command, rename = "list")]
    pub async fn envelope_list(
        ctx: Context<'_>,
        #[description = "Text to find in the id, client or repair type"] search: Option<String>,
        #[description = "Only envelopes with this status"] status: Option<StatusChoice>,
        #[description = "Only repairs or only engravings"] service: Option<ServiceChoice>,
    ) -> Result<()> {
        let db = &ctx.data().database;
        ctx.defer().await?;

        let mut list = ListView::<Envelopes>::new();
        if let Some(notification) = list.load(db).await {
            ctx.say(notification.to_string()).await?;
            return Ok(());
        }
        list.set_search(search.unwrap_or_default());
        list.set_status(status.map(Into::into));
        list.set_category(service.map(|s| ServiceType::from(s).key().to_string()));

        if list.records().is_empty() {
            ctx.say("📂 No envelopes yet. Record one with `/envelope new`.")
                .await?;
            return Ok(());
        }

        let visible = list.visible();
        if visible.is_empty() {
            ctx.say("🔍 No envelopes match those filters.").await?;
            return Ok(());
        }

        let mut body = String::new();
        for env in visible.iter().take(MAX_LIST_LINES) {
            writeln!(&mut body, "{}", envelope_line(env))?;
        }
        if visible.len() > MAX_LIST_LINES {
            writeln!(&mut body, "_…and {} more_", visible.len() - MAX_LIST_LINES)?;
        }

        let shop = &ctx.data().config.shop;
        let embed = serenity::CreateEmbed::default()
            .title("✉️ Envelopes")
            .description(body)
            .color(EMBED_COLOR)
            .footer(serenity::CreateEmbedFooter::new(format!(
                "{} | {} of {} envelope{}",
                shop.name,
                visible.len(),
                list.records().len(),
                if list.records().len() == 1 { "" } else { "s" }
            )));
        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Shows every detail of one envelope.
    #[poise::command(slash_command, rename = "show")]
    pub async fn envelope_show(
        ctx: Context<'_>,
        #[description = "Envelope"]
        #[autocomplete = "autocomplete::autocomplete_envelope_id"]
        id: String,
    ) -> Result<()> {
        let db = &ctx.data().database;

        let Some(env) = envelope::get_envelope_by_id(db, &id).await? else {
            ctx.say(format!("❌ {}", Error::not_found(EntityKind::Envelope, id)))
                .await?;
            return Ok(());
        };

        ctx.send(poise::CreateReply::default().embed(envelope_embed(&env)))
            .await?;
        Ok(())
    }

    /// Records a new envelope.
    #[poise::command(slash_command, rename = "new")]
    #[allow(clippy::too_many_arguments)]
    pub async fn envelope_new(
        ctx: Context<'_>,
        #[description = "Client name"]
        #[autocomplete = "autocomplete::autocomplete_client"]
        client: String,
        #[description = "Repair or engraving"] service: ServiceChoice,
        #[description = "Total price, e.g. 150.00"] total_price: String,
        #[description = "Deposit received (default 0)"] deposit: Option<String>,
        #[description = "Kind of repair"]
        #[autocomplete = "autocomplete::autocomplete_repair_type"]
        repair_type: Option<String>,
        #[description = "What to engrave"] engraving_description: Option<String>,
        #[description = "Day the piece came in (YYYY-MM-DD, default today)"]
        intake_date: Option<String>,
        #[description = "Promised delivery date (YYYY-MM-DD)"] due_date: Option<String>,
        #[description = "Who will hand the piece over"] deliverer: Option<String>,
        #[description = "Free-form notes"] notes: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;

        let dates = parse_date("intake_date", intake_date.as_deref())
            .and_then(|intake| Ok((intake, parse_date("due_date", due_date.as_deref())?)));
        let (intake_date, due_date) = match dates {
            Ok(dates) => dates,
            Err(e) => {
                let notification = Notification::from_error(EntityKind::Envelope, "create", &e);
                ctx.say(notification.to_string()).await?;
                return Ok(());
            }
        };

        let mut form = FormView::<Envelopes>::create();
        form.update(|d| {
            d.client = client;
            d.service_type = service.into();
            d.total_price = total_price;
            d.deposit = deposit.unwrap_or_default();
            d.repair_type = repair_type.unwrap_or_default();
            d.engraving_description = engraving_description.unwrap_or_default();
            d.intake_date = intake_date;
            d.due_date = due_date;
            d.deliverer = deliverer.unwrap_or_default();
            d.notes = notes.unwrap_or_default();
        });

        reply_with_outcome(ctx, form.submit(db).await).await
    }

    /// Changes fields of an existing envelope.
    #[poise::command(slash_command, rename = "edit")]
    #[allow(clippy::too_many_arguments)]
    pub async fn envelope_edit(
        ctx: Context<'_>,
        #[description = "Envelope"]
        #[autocomplete = "autocomplete::autocomplete_envelope_id"]
        id: String,
        #[description = "New status"] status: Option<StatusChoice>,
        #[description = "Client name"]
        #[autocomplete = "autocomplete::autocomplete_client"]
        client: Option<String>,
        #[description = "Repair or engraving"] service: Option<ServiceChoice>,
        #[description = "Total price"] total_price: Option<String>,
        #[description = "Deposit received"] deposit: Option<String>,
        #[description = "Kind of repair"]
        #[autocomplete = "autocomplete::autocomplete_repair_type"]
        repair_type: Option<String>,
        #[description = "What to engrave"] engraving_description: Option<String>,
        #[description = "Day the piece came in (YYYY-MM-DD)"] intake_date: Option<String>,
        #[description = "Promised delivery date (YYYY-MM-DD, - to clear)"]
        due_date: Option<String>,
        #[description = "Who will hand the piece over"] deliverer: Option<String>,
        #[description = "Free-form notes"] notes: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;

        let Some(existing) = envelope::get_envelope_by_id(db, &id).await? else {
            ctx.say(format!("❌ {}", Error::not_found(EntityKind::Envelope, id)))
                .await?;
            return Ok(());
        };

        let dates = parse_date("intake_date", intake_date.as_deref())
            .and_then(|intake| Ok((intake, parse_date_change("due_date", due_date.as_deref())?)));
        let (intake_date, due_date) = match dates {
            Ok(dates) => dates,
            Err(e) => {
                let notification = Notification::from_error(EntityKind::Envelope, "update", &e);
                ctx.say(notification.to_string()).await?;
                return Ok(());
            }
        };

        let mut form = FormView::<Envelopes>::edit(existing);
        form.update(|d| {
            if let Some(status) = status {
                d.status = status.into();
            }
            if let Some(client) = client {
                d.client = client;
            }
            if let Some(service) = service {
                d.service_type = service.into();
            }
            if let Some(total) = total_price {
                d.total_price = total;
            }
            if let Some(deposit) = deposit {
                d.deposit = deposit;
            }
            if let Some(repair) = repair_type {
                d.repair_type = repair;
            }
            if let Some(engraving) = engraving_description {
                d.engraving_description = engraving;
            }
            if intake_date.is_some() {
                d.intake_date = intake_date;
            }
            if let Some(due) = due_date {
                d.due_date = due;
            }
            if let Some(deliverer) = deliverer {
                d.deliverer = deliverer;
            }
            if let Some(notes) = notes {
                d.notes = notes;
            }
        });

        reply_with_outcome(ctx, form.submit(db).await).await
    }

    /// Counts envelopes by status and totals the outstanding balance.
    #[poise::command(slash_command, rename = "stats")]
    pub async fn envelope_stats(ctx: Context<'_>) -> Result<()> {
        let stats = report::envelope_stats(&ctx.data().database).await?;

        let mut body = String::new();
        writeln!(&mut body, "⏳ **Pending:** {}", stats.pending)?;
        writeln!(&mut body, "🔧 **In progress:** {}", stats.in_progress)?;
        writeln!(&mut body, "✅ **Completed:** {}", stats.completed)?;
        writeln!(&mut body, "📦 **Delivered:** {}", stats.delivered)?;
        writeln!(
            &mut body,
            "\n💰 **Outstanding balance:** {}",
            report::format_money(stats.outstanding)
        )?;

        let embed = serenity::CreateEmbed::default()
            .title(format!("📊 Envelopes at {}", ctx.data().config.shop.name))
            .description(body)
            .color(EMBED_COLOR)
            .footer(serenity::CreateEmbedFooter::new(format!(
                "{} envelopes in total",
                stats.total()
            )));
        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    async fn reply_with_outcome(
        ctx: Context<'_>,
        outcome: SubmitOutcome<EnvelopeModel>,
    ) -> Result<()> {
        match outcome {
            SubmitOutcome::Saved {
                record,
                notification,
            } => {
                info!("Envelope {} saved via Discord", record.id);
                ctx.send(
                    poise::CreateReply::default()
                        .content(notification.to_string())
                        .embed(envelope_embed(&record)),
                )
                .await?;
            }
            SubmitOutcome::Invalid { notification, .. } | SubmitOutcome::Failed { notification } => {
                ctx.say(notification.to_string()).await?;
            }
        }
        Ok(())
    }

    fn envelope_line(env: &EnvelopeModel) -> String {
        format!(
            "`{}` **{}** · {} · {} · due {}",
            short_id(&env.id),
            env.client,
            env.service_type,
            env.status,
            report::format_money(env.balance_due())
        )
    }

    fn envelope_embed(env: &EnvelopeModel) -> serenity::CreateEmbed {
        let detail = match env.service_type {
            ServiceType::Repair => env.repair_type.as_deref(),
            ServiceType::Engraving => env.engraving_description.as_deref(),
        }
        .unwrap_or("-");
        let due = env
            .due_date
            .map_or_else(|| "-".to_string(), |d| d.format("%Y-%m-%d").to_string());
        let mut balance = report::format_money(env.balance_due());
        if env.is_overpaid() {
            balance.push_str(" (overpaid)");
        }

        serenity::CreateEmbed::default()
            .title(format!("✉️ {}", env.client))
            .description(format!("`{}`", env.id))
            .color(EMBED_COLOR)
            .field("Service", format!("{} - {detail}", env.service_type), true)
            .field("Status", env.status.to_string(), true)
            .field("Total", report::format_money(env.total_price), true)
            .field("Deposit", report::format_money(env.deposit), true)
            .field("Balance due", balance, true)
            .field(
                "Paid",
                report::format_progress_bar(report::paid_percent(env), Some(10)),
                false,
            )
            .field("Received", env.intake_date.format("%Y-%m-%d").to_string(), true)
            .field("Promised", due, true)
            .field(
                "Deliverer",
                env.deliverer.clone().unwrap_or_else(|| "-".to_string()),
                true,
            )
            .field(
                "Notes",
                env.notes.clone().unwrap_or_else(|| "-".to_string()),
                false,
            )
    }
}

// Re-export all commands
pub use inner::*;
