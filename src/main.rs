use clap::Parser;
use periqles::adapters::form_assembler::FormAssembler;
use periqles::adapters::introspection::{HttpTransport, SchemaIntrospector};
use periqles::adapters::page::render_page;
use periqles::adapters::preview_handler::PreviewState;
use periqles::cli::{Cli, Command};
use periqles::config::Settings;
use periqles::domain::{ChangeHandler, FormState, FormStateSetter};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries command output, logs go to stderr
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let settings = Settings::new_with_cli(&cli)?;

    let transport = HttpTransport::new(&settings.endpoint.url)?;
    let introspector = SchemaIntrospector::new(Arc::new(transport));
    let supplied_args = settings.supplied_args();
    let assembler = FormAssembler::new(&settings.form.mutation)
        .with_header(settings.form.header.clone())
        .with_submit_text(&settings.form.submit_text)
        .with_specifications(settings.specifications());

    match cli.command {
        Command::Fields => {
            let fields = introspector
                .resolve(&settings.form.mutation, &supplied_args)
                .await?;
            println!("{}", serde_json::to_string_pretty(&fields)?);
        }
        Command::Render => {
            let fields = introspector
                .resolve(&settings.form.mutation, &supplied_args)
                .await?;
            let form = assembler.assemble(
                &fields,
                &FormState::new(),
                &ChangeHandler::noop(),
                &FormStateSetter::noop(),
            );
            let page = render_page(&assembler.header(), &form, Some(&settings.endpoint.url))?;
            println!("{}", page);
        }
        Command::Preview => {
            let state = Arc::new(PreviewState {
                introspector,
                assembler,
                supplied_args,
                endpoint: Some(settings.endpoint.url.clone()),
            });
            let app = periqles::create_app(state);

            let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
            info!(
                "Serving the {} form from {} on {}",
                settings.form.mutation, settings.endpoint.url, addr
            );
            let listener = tokio::net::TcpListener::bind(addr).await?;
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
