//! Employee Discord commands - roster, profile, hiring, edits and removal.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            Context,
            commands::{EMBED_COLOR, MAX_LIST_LINES, parse_date, short_id},
            handlers::autocomplete,
        },
        core::{employee, kind::Employees, report},
        entities::{EmployeeModel, EmployeeStatus, EntityKind},
        errors::{Error, Result},
        views::{FormView, ListView, Notification, SubmitOutcome},
    };
    use poise::serenity_prelude as serenity;
    use std::fmt::Write;
    use std::time::Duration;
    use tracing::{debug, info};

    const CONFIRM_TIMEOUT: Duration = Duration::from_secs(30);

    #[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
    pub enum StatusChoice {
        #[name = "Active"]
        Active,
        #[name = "Inactive"]
        Inactive,
    }

    impl From<StatusChoice> for EmployeeStatus {
        fn from(choice: StatusChoice) -> Self {
            match choice {
                StatusChoice::Active => Self::Active,
                StatusChoice::Inactive => Self::Inactive,
            }
        }
    }

    /// Manage the shop's staff.
    #[poise::command(
        slash_command,
        subcommands(
            "employee_list",
            "employee_show",
            "employee_new",
            "employee_edit",
            "employee_delete",
            "employee_stats"
        ),
        subcommand_required
    )]
    pub async fn employee(_ctx: Context<'_>) -> Result<()> {
        Ok(())
    }

    /// Lists employees with optional filters.
    #[poise::command(slash_command, rename = "list")]
    pub async fn employee_list(
        ctx: Context<'_>,
        #[description = "Text to find in the id, name or position"] search: Option<String>,
        #[description = "Only active or only inactive employees"] status: Option<StatusChoice>,
        #[description = "Only this position"]
        #[autocomplete = "autocomplete::autocomplete_position"]
        position: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;
        ctx.defer().await?;

        let mut list = ListView::<Employees>::new();
        if let Some(notification) = list.load(db).await {
            ctx.say(notification.to_string()).await?;
            return Ok(());
        }
        list.set_search(search.unwrap_or_default());
        list.set_status(status.map(Into::into));
        list.set_category(position);

        if list.records().is_empty() {
            ctx.say("👥 No employees yet. Add one with `/employee new`.")
                .await?;
            return Ok(());
        }

        let visible = list.visible();
        if visible.is_empty() {
            ctx.say("🔍 No employees match those filters.").await?;
            return Ok(());
        }

        let mut body = String::new();
        for emp in visible.iter().take(MAX_LIST_LINES) {
            let marker = match emp.status {
                EmployeeStatus::Active => "🟢",
                EmployeeStatus::Inactive => "⚪",
            };
            writeln!(
                &mut body,
                "{marker} `{}` **{}** · {} · {}",
                short_id(&emp.id),
                emp.full_name(),
                emp.position,
                emp.phone
            )?;
        }
        if visible.len() > MAX_LIST_LINES {
            writeln!(&mut body, "_…and {} more_", visible.len() - MAX_LIST_LINES)?;
        }

        let embed = serenity::CreateEmbed::default()
            .title("👥 Employees")
            .description(body)
            .color(EMBED_COLOR)
            .footer(serenity::CreateEmbedFooter::new(format!(
                "{} | {} of {} employees",
                ctx.data().config.shop.name,
                visible.len(),
                list.records().len()
            )));
        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Shows one employee's profile.
    #[poise::command(slash_command, rename = "show")]
    pub async fn employee_show(
        ctx: Context<'_>,
        #[description = "Employee"]
        #[autocomplete = "autocomplete::autocomplete_employee_id"]
        id: String,
    ) -> Result<()> {
        let db = &ctx.data().database;

        let Some(emp) = employee::get_employee_by_id(db, &id).await? else {
            ctx.say(format!("❌ {}", Error::not_found(EntityKind::Employee, id)))
                .await?;
            return Ok(());
        };

        ctx.send(poise::CreateReply::default().embed(employee_embed(&emp)))
            .await?;
        Ok(())
    }

    /// Adds an employee.
    #[poise::command(slash_command, rename = "new")]
    #[allow(clippy::too_many_arguments)]
    pub async fn employee_new(
        ctx: Context<'_>,
        #[description = "First name"] first_name: String,
        #[description = "Last name"] last_name: String,
        #[description = "Position"]
        #[autocomplete = "autocomplete::autocomplete_position"]
        position: String,
        #[description = "Phone number"] phone: String,
        #[description = "Email address"] email: String,
        #[description = "Monthly salary, e.g. 2500"] monthly_salary: String,
        #[description = "Home address"] address: Option<String>,
        #[description = "Specialty, e.g. stone setting"] specialty: Option<String>,
        #[description = "Hire date (YYYY-MM-DD, default today)"] hire_date: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;

        let hire_date = match parse_date("hire_date", hire_date.as_deref()) {
            Ok(date) => date,
            Err(e) => {
                let notification = Notification::from_error(EntityKind::Employee, "create", &e);
                ctx.say(notification.to_string()).await?;
                return Ok(());
            }
        };

        let mut form = FormView::<Employees>::create();
        form.update(|d| {
            d.first_name = first_name;
            d.last_name = last_name;
            d.position = position;
            d.phone = phone;
            d.email = email;
            d.monthly_salary = monthly_salary;
            d.address = address.unwrap_or_default();
            d.specialty = specialty.unwrap_or_default();
            d.hire_date = hire_date;
        });

        reply_with_outcome(ctx, form.submit(db).await).await
    }

    /// Changes fields of an existing employee.
    #[poise::command(slash_command, rename = "edit")]
    #[allow(clippy::too_many_arguments)]
    pub async fn employee_edit(
        ctx: Context<'_>,
        #[description = "Employee"]
        #[autocomplete = "autocomplete::autocomplete_employee_id"]
        id: String,
        #[description = "Active or inactive"] status: Option<StatusChoice>,
        #[description = "First name"] first_name: Option<String>,
        #[description = "Last name"] last_name: Option<String>,
        #[description = "Position"]
        #[autocomplete = "autocomplete::autocomplete_position"]
        position: Option<String>,
        #[description = "Phone number"] phone: Option<String>,
        #[description = "Email address"] email: Option<String>,
        #[description = "Monthly salary"] monthly_salary: Option<String>,
        #[description = "Home address"] address: Option<String>,
        #[description = "Specialty"] specialty: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;

        let Some(existing) = employee::get_employee_by_id(db, &id).await? else {
            ctx.say(format!("❌ {}", Error::not_found(EntityKind::Employee, id)))
                .await?;
            return Ok(());
        };

        let mut form = FormView::<Employees>::edit(existing);
        form.update(|d| {
            let fields = [
                (&mut d.first_name, first_name),
                (&mut d.last_name, last_name),
                (&mut d.position, position),
                (&mut d.phone, phone),
                (&mut d.email, email),
                (&mut d.monthly_salary, monthly_salary),
                (&mut d.address, address),
                (&mut d.specialty, specialty),
            ];
            for (slot, value) in fields {
                if let Some(value) = value {
                    *slot = value;
                }
            }
            if let Some(status) = status {
                d.status = status.into();
            }
        });

        reply_with_outcome(ctx, form.submit(db).await).await
    }

    /// Removes an employee after a confirmation prompt.
    #[poise::command(slash_command, rename = "delete")]
    pub async fn employee_delete(
        ctx: Context<'_>,
        #[description = "Employee"]
        #[autocomplete = "autocomplete::autocomplete_employee_id"]
        id: String,
    ) -> Result<()> {
        let db = &ctx.data().database;

        let mut list = ListView::<Employees>::new();
        if let Some(notification) = list.load(db).await {
            ctx.say(notification.to_string()).await?;
            return Ok(());
        }
        if !list.request_delete(&id) {
            ctx.say(format!("❌ {}", Error::not_found(EntityKind::Employee, id)))
                .await?;
            return Ok(());
        }
        let name = list
            .records()
            .iter()
            .find(|e| e.id == id)
            .map_or_else(|| id.clone(), EmployeeModel::full_name);

        let ctx_id = ctx.id();
        let confirm_id = format!("{ctx_id}-confirm");
        let cancel_id = format!("{ctx_id}-cancel");
        let buttons = serenity::CreateActionRow::Buttons(vec![
            serenity::CreateButton::new(&confirm_id)
                .label("Delete")
                .style(serenity::ButtonStyle::Danger),
            serenity::CreateButton::new(&cancel_id)
                .label("Cancel")
                .style(serenity::ButtonStyle::Secondary),
        ]);
        let reply = ctx
            .send(
                poise::CreateReply::default()
                    .content(format!(
                        "⚠️ Delete **{name}**? This cannot be undone."
                    ))
                    .components(vec![buttons]),
            )
            .await?;

        let prefix = ctx_id.to_string();
        let press = serenity::ComponentInteractionCollector::new(ctx.serenity_context())
            .author_id(ctx.author().id)
            .channel_id(ctx.channel_id())
            .timeout(CONFIRM_TIMEOUT)
            .filter(move |press| press.data.custom_id.starts_with(&prefix))
            .await;

        let Some(press) = press else {
            debug!("Delete of employee {id} timed out");
            list.cancel_delete();
            reply
                .edit(
                    ctx,
                    poise::CreateReply::default()
                        .content("⌛ Delete cancelled: no answer.")
                        .components(vec![]),
                )
                .await?;
            return Ok(());
        };

        let content = if press.data.custom_id == confirm_id {
            list.confirm_delete(db)
                .await
                .map_or_else(String::new, |n| n.to_string())
        } else {
            list.cancel_delete();
            format!("↩️ **{name}** was kept.")
        };

        press
            .create_response(
                ctx.serenity_context(),
                serenity::CreateInteractionResponse::UpdateMessage(
                    serenity::CreateInteractionResponseMessage::new()
                        .content(content)
                        .components(vec![]),
                ),
            )
            .await?;
        Ok(())
    }

    /// Counts active employees and specialists.
    #[poise::command(slash_command, rename = "stats")]
    pub async fn employee_stats(ctx: Context<'_>) -> Result<()> {
        let stats = report::employee_stats(&ctx.data().database).await?;

        let mut body = String::new();
        writeln!(&mut body, "🟢 **Active:** {}", stats.active)?;
        writeln!(&mut body, "👥 **Total:** {}", stats.total)?;
        writeln!(&mut body, "💎 **Specialists:** {}", stats.specialists)?;

        let embed = serenity::CreateEmbed::default()
            .title(format!("📊 Staff at {}", ctx.data().config.shop.name))
            .description(body)
            .color(EMBED_COLOR);
        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    async fn reply_with_outcome(
        ctx: Context<'_>,
        outcome: SubmitOutcome<EmployeeModel>,
    ) -> Result<()> {
        match outcome {
            SubmitOutcome::Saved {
                record,
                notification,
            } => {
                info!("Employee {} saved via Discord", record.id);
                ctx.send(
                    poise::CreateReply::default()
                        .content(notification.to_string())
                        .embed(employee_embed(&record)),
                )
                .await?;
            }
            SubmitOutcome::Invalid { notification, .. } | SubmitOutcome::Failed { notification } => {
                ctx.say(notification.to_string()).await?;
            }
        }
        Ok(())
    }

    fn employee_embed(emp: &EmployeeModel) -> serenity::CreateEmbed {
        let dash = || "-".to_string();
        serenity::CreateEmbed::default()
            .title(format!("👤 {}", emp.full_name()))
            .description(format!("`{}`", emp.id))
            .color(EMBED_COLOR)
            .field("Position", emp.position.clone(), true)
            .field("Status", emp.status.to_string(), true)
            .field("Salary", report::format_money(emp.monthly_salary), true)
            .field("Phone", emp.phone.clone(), true)
            .field("Email", emp.email.clone(), true)
            .field("Hired", emp.hire_date.format("%Y-%m-%d").to_string(), true)
            .field("Address", emp.address.clone().unwrap_or_else(dash), false)
            .field("Specialty", emp.specialty.clone().unwrap_or_else(dash), false)
    }
}

// Re-export all commands
pub use inner::*;
