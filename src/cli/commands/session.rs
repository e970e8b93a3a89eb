use crate::cli::context::AppContext;
use crate::errors::AppResult;
use crate::session::SessionService;
use crate::ui::messages::{info, success};

pub fn login(username: &str, ctx: &mut AppContext) -> AppResult<()> {
    let session = ctx.session()?.login(username)?;
    ctx.audit("login", &session.username, "Session started");
    success(format!("Logged in as {}", session.username));
    Ok(())
}

pub fn logout(ctx: &mut AppContext) -> AppResult<()> {
    match ctx.session()?.logout()? {
        Some(user) => {
            ctx.audit("logout", &user, "Session ended");
            success(format!("Goodbye, {user}"));
        }
        None => info("No active session."),
    }
    Ok(())
}

pub fn whoami(ctx: &mut AppContext) -> AppResult<()> {
    match ctx.session()?.current_user()? {
        Some(s) => {
            println!(
                "👤 {} (since {})",
                s.username,
                s.logged_in.format("%Y-%m-%d %H:%M")
            );
            if let Some(room) = s.last_room {
                println!("🍽️  Last room: {room}");
            }
        }
        None => info("Not logged in."),
    }
    Ok(())
}
