use crate::{config::models::ConfigOpts, credentials::mask_key};
use std::fmt::{Debug, Display};

fn __display<T>(opt: Option<&T>) -> String
where
    T: Debug,
{
    match opt {
        Some(opt) => format!("{:?}", opt),
        None => "None".to_string(),
    }
}

impl Display for ConfigOpts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Auth
        let auth = self.auth.as_ref();
        writeln!(
            f,
            "Email: {}",
            __display(auth.and_then(|a| a.email.as_ref()))
        )?;
        let masked = auth.and_then(|a| a.key.as_deref()).map(mask_key);
        writeln!(f, "Global API Key: {}", __display(masked.as_ref()))?;

        // Store
        writeln!(f, "Accounts file: {}", self.accounts_file().display())?;
        writeln!(f, "Scripts file: {}", self.scripts_file().display())?;

        // Deploy
        writeln!(f, "Deploy URL: {}", self.deploy_url())?;
        writeln!(f, "Cloudflare API: {}", self.api_base())?;
        write!(f, "Timeout: {}s", self.timeout().as_secs())
    }
}
