use super::failed;
use crate::app::AppContext;
use crate::prompt::Prompter;
use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use colored::Colorize;
use zeroth_core::account::{AccountSex, PREFECTURES, Registration};

/// Registration fields given on the command line; missing ones are prompted.
#[derive(Debug, Default)]
pub struct RegisterInput {
    pub user_name: Option<String>,
    pub screen_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub sex: Option<String>,
    pub birth_date: Option<String>,
    pub address: Option<String>,
}

pub async fn register(ctx: &AppContext, input: RegisterInput) -> Result<()> {
    let mut prompter = Prompter::new()?;

    let user_name = given_or(input.user_name, || prompter.text("Name", None))?;
    let screen_name = given_or(input.screen_name, || prompter.text("Screen name", None))?;
    let email = given_or(input.email, || prompter.text("Email", None))?;
    let password = given_or(input.password, || prompter.text("Password", None))?;
    let sex = given_or(input.sex, || prompter.text("Sex (M/F/N)", Some("N")))?
        .parse::<AccountSex>()
        .map_err(|e| anyhow!(e))?;
    let birth_date = parse_date(&given_or(input.birth_date, || {
        prompter.text("Birth date (YYYY-MM-DD)", None)
    })?)?;
    let prefectures: Vec<String> = PREFECTURES.iter().map(|p| p.to_string()).collect();
    let address = given_or(input.address, || prompter.completing("Prefecture", &prefectures))?;

    let registration = Registration {
        user_name,
        screen_name,
        password,
        sex,
        birth_date,
        address,
        email,
    };
    ctx.accounts
        .register(&registration)
        .await
        .map_err(|e| failed("Registration", e))?;

    println!("{}", "Registration complete. You can now log in.".green());
    Ok(())
}

pub async fn login(
    ctx: &AppContext,
    email: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let (email, password) = match (email, password) {
        (Some(email), Some(password)) => (email, password),
        (email, password) => {
            let mut prompter = Prompter::new()?;
            let email = given_or(email, || prompter.text("Email", None))?;
            let password = given_or(password, || prompter.text("Password", None))?;
            (email, password)
        }
    };

    let session = ctx
        .session
        .sign_in(email.trim(), &password)
        .await
        .map_err(|e| anyhow!(e.user_message("Login")))?;

    println!(
        "{}",
        format!("Logged in. Welcome, {}!", session.screen_name).green()
    );
    Ok(())
}

pub fn logout(ctx: &AppContext) -> Result<()> {
    ctx.session.sign_out();
    println!("{}", "Logged out.".green());
    Ok(())
}

pub async fn whoami(ctx: &AppContext) -> Result<()> {
    let had_token = ctx.session.credential().is_some() || ctx.paths.token_file().exists();
    match ctx.session.restore_session().await {
        Some(session) => {
            println!("{} <{}>", session.screen_name.bold(), session.email);
        }
        // still attached means the check failed for a reason other than 401
        None if ctx.session.credential().is_some() => {
            println!(
                "{}",
                "Could not reach the server to check your session.".yellow()
            );
        }
        None if had_token => println!("Not logged in (the saved session has expired)."),
        None => println!("Not logged in."),
    }
    Ok(())
}

fn given_or(value: Option<String>, ask: impl FnOnce() -> Result<String>) -> Result<String> {
    match value {
        Some(value) => Ok(value),
        None => ask(),
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .with_context(|| format!("'{raw}' is not a date in YYYY-MM-DD form"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date(" 2020-05-17 ").unwrap(),
            NaiveDate::from_ymd_opt(2020, 5, 17).unwrap()
        );
        assert!(parse_date("17/05/2020").is_err());
    }

    #[test]
    fn test_given_value_skips_prompt() {
        let value = given_or(Some("given".into()), || panic!("should not prompt")).unwrap();
        assert_eq!(value, "given");
    }
}
