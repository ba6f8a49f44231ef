use std::io::{self, BufRead};

use crate::cli::parser::Commands;
use crate::context::AppContext;
use crate::core::account::{AccountLogic, SignupForm};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};

/// Read one line from stdin without the trailing newline.
fn read_secret(prompt: &str) -> AppResult<String> {
    eprint!("{}: ", prompt);
    let mut line = String::new();
    let n = io::stdin().lock().read_line(&mut line)?;
    if n == 0 {
        return Err(AppError::Validation(format!("{} was not provided", prompt)));
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

pub fn signup(cmd: &Commands, ctx: &AppContext) -> AppResult<()> {
    if let Commands::Signup {
        username,
        email,
        password,
        confirm,
    } = cmd
    {
        // a password typed on the command line needs no confirmation
        let (password, confirm) = match (password, confirm) {
            (Some(p), Some(c)) => (p.clone(), c.clone()),
            (Some(p), None) => (p.clone(), p.clone()),
            (None, _) => (read_secret("Password")?, read_secret("Confirm password")?),
        };

        let form = SignupForm {
            username: username.clone(),
            email: email.clone(),
            password,
            confirm,
        };
        let user = AccountLogic::signup(ctx.api.as_ref(), &form)?;
        success(format!("Account '{}' created (id {})", user.username, user.id));
        info("Log in with `ramenlog login --username <name>`");
    }
    Ok(())
}

pub fn login(cmd: &Commands, ctx: &AppContext) -> AppResult<()> {
    if let Commands::Login { username, password } = cmd {
        let password = match password {
            Some(p) => p.clone(),
            None => read_secret("Password")?,
        };
        AccountLogic::login(ctx.api.as_ref(), &ctx.tokens, username, &password)?;
        success(format!("Logged in as {}", username.trim()));
    }
    Ok(())
}

pub fn logout(ctx: &AppContext) -> AppResult<()> {
    if AccountLogic::logout(&ctx.tokens)? {
        success("Logged out");
    } else {
        info("Not logged in");
    }
    Ok(())
}

pub fn refresh(ctx: &AppContext) -> AppResult<()> {
    AccountLogic::refresh(ctx.api.as_ref(), &ctx.tokens)?;
    success("Access token refreshed");
    Ok(())
}
