use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;

use amocrm::resources::{AccountsConfig, LeadsConfig};
use amocrm::utils::logging::{self, log_config_loaded, log_validation_error};
use amocrm::{random_state, AmoCrmClient, AmoCrmError, Settings, Token};

/// amoCRM CLI - Interface de linha de comando para a API v4 do amoCRM
#[derive(Parser)]
#[command(name = "amocrm")]
#[command(version = "0.1.0")]
#[command(about = "CLI para integração com a API v4 do amoCRM", long_about = None)]
struct Cli {
    /// Domínio da conta, ex.: example.amocrm.ru (ou use AMOCRM_DOMAIN)
    #[arg(short = 'd', long, env = "AMOCRM_DOMAIN", global = true)]
    domain: Option<String>,

    /// Access token atual (ou use AMOCRM_ACCESS_TOKEN)
    #[arg(long, env = "AMOCRM_ACCESS_TOKEN", global = true, hide_env_values = true)]
    access_token: Option<String>,

    /// Refresh token usado quando o access token expira
    #[arg(long, env = "AMOCRM_REFRESH_TOKEN", global = true, hide_env_values = true)]
    refresh_token: Option<String>,

    #[arg(long, env = "AMOCRM_TOKEN_TYPE", default_value = "Bearer", global = true)]
    token_type: String,

    /// Expiração do access token (RFC 3339); sem valor o token não expira
    #[arg(long, env = "AMOCRM_EXPIRES_AT", global = true)]
    expires_at: Option<DateTime<Utc>>,

    /// Formato de saída (json, pretty)
    #[arg(short = 'o', long, default_value = "pretty", global = true)]
    output: OutputFormat,

    /// Modo verbose para debug
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Debug, PartialEq)]
enum OutputFormat {
    Json,
    Pretty,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "pretty" => Ok(OutputFormat::Pretty),
            _ => Err(format!("Formato desconhecido: {}", s)),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Gera a URL da página de consentimento
    AuthorizeUrl {
        /// State anti-CSRF (gerado aleatoriamente se omitido)
        #[arg(short = 's', long)]
        state: Option<String>,

        /// Modo de retorno (post_message, popup)
        #[arg(short = 'm', long, default_value = "post_message")]
        mode: String,
    },

    /// Troca o authorization code por um token
    Exchange {
        #[arg(short = 'c', long)]
        code: String,
    },

    /// Renova o token com o --refresh-token informado
    Refresh,

    /// Mostra os dados da conta
    Account {
        /// Relações a incluir (amojo_id, uuid, version, ...)
        #[arg(short = 'w', long = "with", value_delimiter = ',')]
        relations: Vec<String>,
    },

    /// Lista leads
    Leads {
        /// Relações a incluir (contacts, loss_reason, ...)
        #[arg(short = 'w', long = "with", value_delimiter = ',')]
        relations: Vec<String>,

        #[arg(short = 'p', long)]
        page: Option<u32>,

        /// Itens por página (máximo 250)
        #[arg(short = 'l', long)]
        limit: Option<u32>,
    },
}

#[derive(Serialize)]
struct CliResponse {
    success: bool,
    data: serde_json::Value,
    /// Token renovado durante o comando, que deve ser persistido
    #[serde(skip_serializing_if = "Option::is_none")]
    token: Option<Token>,
}

impl CliResponse {
    fn success(data: serde_json::Value) -> Self {
        Self {
            success: true,
            data,
            token: None,
        }
    }

    fn with_token(mut self, token: Option<Token>) -> Self {
        self.token = token;
        self
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    logging::init(cli.verbose);

    let result = execute_command(&cli).await;

    match result {
        Ok(response) => {
            if let Err(e) = output_response(&response, &cli.output) {
                eprintln!("❌ Erro: {:#}", e);
                std::process::exit(1);
            }
        }
        Err(e) => {
            if let Some(error) = e.downcast_ref::<AmoCrmError>() {
                if error.is_validation() {
                    log_validation_error("input", &error.to_string());
                }
            }
            eprintln!("❌ Erro: {:#}", e);
            std::process::exit(1);
        }
    }
}

async fn execute_command(cli: &Cli) -> Result<CliResponse> {
    let settings = Settings::new().context("Falha ao carregar configuração AMOCRM_*")?;
    let domain = cli.domain.clone().or_else(|| settings.domain.clone());
    log_config_loaded(domain.as_deref());

    let mut client = AmoCrmClient::new(settings.credentials())?;
    if let Some(domain) = &domain {
        client.set_domain(domain)?;
    }

    match &cli.command {
        Commands::AuthorizeUrl { state, mode } => {
            let state = state.clone().unwrap_or_else(random_state);
            let url = client.build_authorization_url(&state, mode)?;

            Ok(CliResponse::success(json!({
                "url": url.as_str(),
                "state": state,
            })))
        }

        Commands::Exchange { code } => {
            let token = client.exchange_code(code).await?;
            Ok(CliResponse::success(serde_json::to_value(&token)?))
        }

        Commands::Refresh => {
            let refresh_token = cli.refresh_token.as_deref().unwrap_or_default();
            let token = client.refresh_token(refresh_token).await?;
            Ok(CliResponse::success(serde_json::to_value(&token)?))
        }

        Commands::Account { relations } => {
            let initial = session_token(cli)?;
            client.set_token(initial.clone())?;

            let config = AccountsConfig {
                relations: relations.clone(),
            };
            let account = client.accounts().current(&config).await?;

            Ok(CliResponse::success(serde_json::to_value(&account)?)
                .with_token(refreshed_token(&client, &initial)))
        }

        Commands::Leads {
            relations,
            page,
            limit,
        } => {
            let initial = session_token(cli)?;
            client.set_token(initial.clone())?;

            let config = LeadsConfig {
                relations: relations.clone(),
                page: *page,
                limit: *limit,
            };
            let leads = client.leads().list(&config).await?;

            Ok(CliResponse::success(serde_json::to_value(&leads)?)
                .with_token(refreshed_token(&client, &initial)))
        }
    }
}

/// Token montado a partir das flags globais
fn session_token(cli: &Cli) -> Result<Token> {
    let Some(access_token) = cli.access_token.as_deref() else {
        bail!("Forneça --access-token ou AMOCRM_ACCESS_TOKEN");
    };

    Ok(Token::new(
        access_token,
        cli.refresh_token.clone().unwrap_or_default(),
        cli.token_type.as_str(),
        cli.expires_at,
    ))
}

fn refreshed_token(client: &AmoCrmClient, initial: &Token) -> Option<Token> {
    client.token().filter(|token| *token != initial).cloned()
}

fn output_response(response: &CliResponse, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string(response)?);
        }
        OutputFormat::Pretty => {
            println!("✅ Sucesso!");
            println!("{}", serde_json::to_string_pretty(&response.data)?);
            if let Some(token) = &response.token {
                println!("🔄 Token renovado, persista o novo valor:");
                println!("{}", serde_json::to_string_pretty(token)?);
            }
        }
    }

    Ok(())
}
