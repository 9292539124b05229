use anyhow::{anyhow, Result};
use portal_core::consent::FALLBACK_ROUTE;
use portal_core::{ConsentRequest, ConsentView, PortalClient, TracingNotifier};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Accept,
    Reject,
}

async fn load(view: &ConsentView<TracingNotifier>) -> Result<ConsentRequest> {
    view.load()
        .await
        .map_err(|route| anyhow!("no consent to review, go back to {route}"))
}

pub async fn scopes(client: PortalClient) -> Result<()> {
    let view = ConsentView::new(client, TracingNotifier);
    let request = load(&view).await?;

    println!("{}", render(&request));
    Ok(())
}

pub async fn decide(client: PortalClient, choice: Choice) -> Result<()> {
    let view = ConsentView::new(client, TracingNotifier);
    load(&view).await?;

    let target = match choice {
        Choice::Accept => view.accept().await?,
        Choice::Reject => view.reject().await?,
    };
    println!("{}", target.as_deref().unwrap_or(FALLBACK_ROUTE));
    Ok(())
}

/// Text shown for a pending consent.
pub fn render(request: &ConsentRequest) -> String {
    let mut out = match &request.client_description {
        Some(description) => format!(
            "{} ({description}) requests the following privileges",
            request.client_id
        ),
        None => format!("{} requests the following privileges", request.client_id),
    };
    for privilege in request.privileges() {
        out.push_str("\n  - ");
        out.push_str(&privilege.description);
    }
    out
}
