use crate::{
    cmd::confirm,
    config::models::ConfigOpts,
    io::{term, Scanner},
    store::ScriptStore,
};
use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use tracing::info;

/// Manage worker script URLs.
#[derive(Debug, Args)]
#[clap(name = "script")]
pub struct ScriptCmd {
    #[clap(subcommand)]
    action: ScriptSubcommands,
}

#[derive(Clone, Debug, Subcommand)]
enum ScriptSubcommands {
    /// List script URLs.
    List,
    /// Add a script URL. Prompts for anything omitted.
    Add {
        /// A unique name for the script.
        #[clap(long)]
        name: Option<String>,
        /// The raw URL of the worker script.
        #[clap(long)]
        url: Option<String>,
        /// Make the new script the default.
        #[clap(long)]
        default: bool,
    },
    /// Remove a script URL.
    Remove {
        /// The script number or name. Prompts when omitted.
        script: Option<String>,
    },
    /// Choose the default script URL.
    Default {
        /// The script number or name. Prompts when omitted.
        script: Option<String>,
    },
}

impl ScriptCmd {
    #[tracing::instrument(level = "trace", skip(self, opts))]
    pub async fn run(self, opts: &ConfigOpts) -> Result<()> {
        let mut scripts = ScriptStore::load_or_init(opts.scripts_file()).await?;
        match self.action {
            ScriptSubcommands::List => {
                list(&scripts);
                Ok(())
            }
            ScriptSubcommands::Add { name, url, default } => {
                let mut scanner = Scanner::new();
                // Fully flagged invocations never prompt.
                let scripted = name.is_some() && url.is_some();
                let input = AddScript {
                    name,
                    url,
                    default: (default || scripted).then_some(default),
                };
                add(&mut scripts, input, &mut scanner).await
            }
            ScriptSubcommands::Remove { script } => {
                let mut scanner = Scanner::new();
                remove(&mut scripts, script.as_deref(), &mut scanner).await
            }
            ScriptSubcommands::Default { script } => {
                let mut scanner = Scanner::new();
                set_default(&mut scripts, script.as_deref(), &mut scanner)
                    .await
            }
        }
    }
}

/// Values for a new script. `None` fields are prompted for.
#[derive(Debug, Default)]
pub struct AddScript {
    pub name: Option<String>,
    pub url: Option<String>,
    pub default: Option<bool>,
}

/// Print the known scripts, marking the default.
pub fn list(scripts: &ScriptStore) {
    if scripts.is_empty() {
        term::warning("No script URLs found. Add a URL first.");
        return;
    }
    println!("{:<30}{}", "No.  Name", "URL");
    println!("{}", term::LIGHT_RULE);
    for (i, script) in scripts.scripts().iter().enumerate() {
        println!(
            "{:<30}{}{}",
            format!("{:2}.  {}", i + 1, script.name),
            script.url,
            if script.is_default { " ← DEFAULT" } else { "" }
        );
    }
}

/// Add a script and save the store.
pub async fn add(
    scripts: &mut ScriptStore,
    input: AddScript,
    scanner: &mut Scanner,
) -> Result<()> {
    let name = match input.name {
        Some(name) => name,
        None => scanner
            .prompt("📝 Script name (e.g. 'Custom Worker v2')", "text")
            .await?
            .unwrap_or_default(),
    };
    let url = match input.url {
        Some(url) => url,
        None => scanner
            .prompt("🔗 Script URL", "url")
            .await?
            .unwrap_or_default(),
    };

    let is_default = scripts.add(&name, &url)?;
    scripts.save().await?;
    info!("added script {}", name.trim());
    term::success(format!("Script '{}' added successfully!", name.trim()));

    if is_default {
        term::info("Automatically set as default URL");
    } else {
        let make_default = match input.default {
            Some(default) => default,
            None => confirm(scanner, "Set as default URL?").await?,
        };
        if make_default {
            scripts.set_default(scripts.len() - 1)?;
            scripts.save().await?;
            term::success("Set as default URL!");
        }
    }
    Ok(())
}

async fn choose(
    scripts: &ScriptStore,
    selector: Option<&str>,
    prompt: &str,
    scanner: &mut Scanner,
) -> Result<Option<usize>> {
    if let Some(selector) = selector {
        return scripts
            .find(selector)
            .with_context(|| format!("no script matches '{selector}'"))
            .map(Some);
    }
    term::numbered(scripts.scripts(), true);
    match scanner.prompt_t::<usize>(prompt, "number").await? {
        Some(n) if n >= 1 && n <= scripts.len() => Ok(Some(n - 1)),
        Some(n) if n == scripts.len() + 1 => {
            term::info("Cancelled");
            Ok(None)
        }
        _ => anyhow::bail!("invalid choice"),
    }
}

/// Remove a script named by `selector`, or chosen interactively.
pub async fn remove(
    scripts: &mut ScriptStore,
    selector: Option<&str>,
    scanner: &mut Scanner,
) -> Result<()> {
    if scripts.is_empty() {
        term::warning("No script URLs to remove.");
        return Ok(());
    }
    let prompt = "Select URL to remove";
    let Some(idx) = choose(scripts, selector, prompt, scanner).await? else {
        return Ok(());
    };
    let removed = scripts.remove(idx)?;
    scripts.save().await?;
    info!("removed script {}", removed.name);
    term::success(format!("Script '{}' removed successfully!", removed.name));
    if removed.is_default {
        if let Some(first) = scripts.scripts().first() {
            term::info(format!("Default URL set to: {}", first.name));
        }
    }
    Ok(())
}

/// Make a script the default, named by `selector` or chosen interactively.
pub async fn set_default(
    scripts: &mut ScriptStore,
    selector: Option<&str>,
    scanner: &mut Scanner,
) -> Result<()> {
    if scripts.is_empty() {
        term::warning("No script URLs found. Add a URL first.");
        return Ok(());
    }
    let prompt = "Select default URL";
    let Some(idx) = choose(scripts, selector, prompt, scanner).await? else {
        return Ok(());
    };
    let name = scripts.set_default(idx)?.name.clone();
    scripts.save().await?;
    term::success(format!("Default script URL set to: {name}"));
    Ok(())
}

/// Pick the script URL for a deployment. An empty answer, or an invalid
/// one, falls back to the default.
pub async fn select_url(
    scripts: &ScriptStore,
    selector: Option<&str>,
    scanner: &mut Scanner,
) -> Result<String> {
    if let Some(selector) = selector {
        return scripts
            .resolve_url(selector)
            .with_context(|| format!("no script matches '{selector}'"));
    }
    if scripts.is_empty() {
        return Ok(scripts.default_url().to_owned());
    }
    println!("\n📦 Select script URL:");
    term::numbered(scripts.scripts(), false);
    let answer = scanner
        .prompt(
            format!("Select URL [1-{} or Enter for default]", scripts.len()),
            "number",
        )
        .await?;
    let Some(answer) = answer else {
        return Ok(scripts.default_url().to_owned());
    };
    match answer.parse::<usize>() {
        Ok(n) if n >= 1 && n <= scripts.len() => {
            Ok(scripts.scripts()[n - 1].url.clone())
        }
        Ok(_) => {
            term::error("Invalid choice, using default");
            Ok(scripts.default_url().to_owned())
        }
        Err(_) => {
            term::error("Invalid input, using default");
            Ok(scripts.default_url().to_owned())
        }
    }
}
