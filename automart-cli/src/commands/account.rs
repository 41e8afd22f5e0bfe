//! Sign-in, registration and password commands.

use anyhow::Result;
use clap::Args;
use client::{Destination, validation};
use shared::models::RegisterRequest;

use super::{
    TRY_AGAIN, failure, guard_auth,
    prompt::{secret, value_or_prompt},
};
use crate::{context::AppContext, toast::show_success};

const FILL_ALL_FIELDS: &str = "Please fill in all fields";

/// Arguments of `automart login`.
#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account email; prompted for when omitted
    #[arg(long, short)]
    pub email: Option<String>,
}

/// Arguments of `automart register`; missing values are prompted for.
#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Given name
    #[arg(long)]
    pub first_name: Option<String>,
    /// Family name
    #[arg(long)]
    pub last_name: Option<String>,
    /// Account email
    #[arg(long, short)]
    pub email: Option<String>,
    /// Postal address
    #[arg(long)]
    pub address: Option<String>,
}

/// Arguments of `automart forgot-password`.
#[derive(Args, Debug)]
pub struct ForgotPasswordArgs {
    /// Account email; prompted for when omitted
    #[arg(long, short)]
    pub email: Option<String>,
}

/// Values from the reset link sent by email.
#[derive(Args, Debug)]
pub struct ResetPasswordArgs {
    /// Token from the reset link
    #[arg(long)]
    pub token: Option<String>,
    /// Email from the reset link
    #[arg(long, short)]
    pub email: Option<String>,
}

/// Sign in unless a session already exists.
pub async fn login(ctx: &AppContext, args: LoginArgs) -> Result<()> {
    let session = &ctx.session;
    if session.is_logged_in() {
        session.navigator().redirect(Destination::Home);
        return Ok(());
    }

    let email = value_or_prompt(args.email, "Email: ")?;
    let password = secret("Password: ")?;
    validation::require_filled(&[email.as_str(), password.as_str()], FILL_ALL_FIELDS)?;

    let user = session
        .login(&email, &password)
        .await
        .map_err(|err| failure(err, "Invalid credentials."))?;
    show_success(&format!("Login successful! Welcome back, {}.", user.display_name()));
    Ok(())
}

/// Create an account and sign in with it.
pub async fn register(ctx: &AppContext, args: RegisterArgs) -> Result<()> {
    let request = RegisterRequest {
        first_name: value_or_prompt(args.first_name, "First name: ")?,
        last_name: value_or_prompt(args.last_name, "Last name: ")?,
        email: value_or_prompt(args.email, "Email: ")?,
        address: value_or_prompt(args.address, "Address: ")?,
        password: secret("Password: ")?,
    };
    validation::require_filled(
        &[
            request.first_name.as_str(),
            request.last_name.as_str(),
            request.email.as_str(),
            request.address.as_str(),
            request.password.as_str(),
        ],
        FILL_ALL_FIELDS,
    )?;
    validation::new_password(&request.password)?;

    let user = ctx
        .session
        .register(&request)
        .await
        .map_err(|err| failure(err, TRY_AGAIN))?;
    show_success(&format!("Registration successful! Signed in as {}.", user.email));
    Ok(())
}

/// Sign out.
pub fn logout(ctx: &AppContext) {
    ctx.session.logout();
    show_success("Signed out.");
}

/// Print the cached profile of the signed-in user.
pub fn whoami(ctx: &AppContext) -> Result<()> {
    guard_auth(&ctx.session)?;
    let Some(user) = ctx.session.current_user() else {
        // Credential without a readable profile.
        println!("Signed in (profile unavailable)");
        return Ok(());
    };

    println!("{} <{}>", user.display_name(), user.email);
    println!("role: {}", user.role);
    println!("session: {}", ctx.config.session_path().display());
    Ok(())
}

/// Request a reset link by email.
pub async fn forgot_password(ctx: &AppContext, args: ForgotPasswordArgs) -> Result<()> {
    if ctx.session.is_logged_in() {
        ctx.session.navigator().redirect(Destination::Home);
        return Ok(());
    }

    let email = value_or_prompt(args.email, "Email: ")?;
    validation::email(&email)?;

    ctx.session
        .forgot_password(&email)
        .await
        .map_err(|err| failure(err, TRY_AGAIN))?;
    show_success("Password reset link sent to your email. Check your inbox and spam folder.");
    Ok(())
}

/// Set a new password from a reset link.
pub async fn reset_password(ctx: &AppContext, args: ResetPasswordArgs) -> Result<()> {
    let token = args.token.unwrap_or_default();
    let email = args.email.unwrap_or_default();
    validation::require_filled(
        &[token.as_str(), email.as_str()],
        "Invalid or expired reset link",
    )?;

    let new_password = secret("New password: ")?;
    validation::new_password(&new_password)?;

    ctx.session
        .reset_password(token.trim(), email.trim(), &new_password)
        .await
        .map_err(|err| failure(err, TRY_AGAIN))?;
    show_success("Password reset successful! You can now sign in.");
    ctx.session.navigator().redirect(Destination::Login);
    Ok(())
}

/// Change the password of the signed-in user.
pub async fn update_password(ctx: &AppContext) -> Result<()> {
    guard_auth(&ctx.session)?;

    let current = secret("Current password: ")?;
    let new = secret("New password: ")?;
    let confirm = secret("Confirm new password: ")?;
    validation::password_change(&current, &new, &confirm)?;

    ctx.session
        .update_password(&current, &new, &confirm)
        .await
        .map_err(|err| failure(err, TRY_AGAIN))?;
    show_success("Password updated successfully!");
    Ok(())
}
