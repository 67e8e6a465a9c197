//! General Discord commands - ping and help.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{bot::Context, errors::Result};

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: Context<'_>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: Context<'_>) -> Result<()> {
        let shop = &ctx.data().config.shop;
        let mut help_text = format!("**{} Help**\n", shop.name);
        if let Some(subtitle) = &shop.subtitle {
            help_text.push_str(&format!("_{subtitle}_\n"));
        }
        help_text.push_str(
            "\n**Envelopes** (repair and engraving jobs)\n\
            • `/envelope list [search] [status] [service]` - Lists envelopes, newest first.\n\
            • `/envelope show <envelope>` - Shows one envelope with its balance due.\n\
            • `/envelope new <client> <service> <total> [deposit] ...` - Records a new job.\n\
            • `/envelope edit <envelope> [status] ...` - Changes an envelope; `due_date:-` clears the due date.\n\
            • `/envelope stats` - Counts by status and the outstanding balance.\n\n\
            **Employees**\n\
            • `/employee list [search] [status] [position]` - Lists the staff.\n\
            • `/employee show <employee>` - Shows a profile.\n\
            • `/employee new <first> <last> <position> <phone> <email> <salary> ...` - Adds an employee.\n\
            • `/employee edit <employee> ...` - Changes an employee.\n\
            • `/employee delete <employee>` - Removes an employee after confirmation.\n\
            • `/employee stats` - Active staff and specialists.\n\n\
            **Utility**\n\
            • `/ping` - Checks if the bot is responsive.\n\
            • `/help` - Shows this help message.\n\n\
            Clients, articles and reports are not available yet.",
        );

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
