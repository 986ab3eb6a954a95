/**
 * Database Seed
 *
 * Empties every table and fills them with sample authors, tags, articles,
 * and a few comment threads. Everything goes through the same validation and
 * services as the HTTP API, so seeded rows obey the API's rules.
 *
 * Every seeded user has the password `123456`.
 */

use std::error::Error;
use std::sync::Arc;

use blog_api::backend::articles::schema as article_schema;
use blog_api::backend::comments::schema as comment_schema;
use blog_api::backend::server::{load_store, AppState};
use blog_api::backend::tags::schema as tag_schema;
use blog_api::backend::users::schema as user_schema;
use blog_api::backend::auth::PasswordHasher;
use blog_api::shared::blog::{
    CreateArticleRequest, CreateCommentRequest, CreateTagRequest, CreateUserRequest,
};
use blog_api::shared::config::DEFAULT_LOG_FILTER;
use blog_api::shared::{ApiResult, AppConfig};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

const SEED_PASSWORD: &str = "123456";

struct SeedArticle {
    title: &'static str,
    author: &'static str,
    content: &'static str,
    tags: [&'static str; 3],
}

const ARTICLES: &[SeedArticle] = &[
    SeedArticle {
        title: "A Revolução da Grão Direto no Agronegócio",
        author: "Fred Marques",
        content: "A Grão Direto conecta produtores e compradores de grãos com recomendações de preço baseadas em dados de mercado em tempo real, tornando negociações mais seguras e rápidas.",
        tags: ["Grão Direto", "Tecnologia", "Agronegócio"],
    },
    SeedArticle {
        title: "Implementando CI/CD em Ambientes Ágeis",
        author: "Carlos Henrique",
        content: "Integração e entrega contínuas automatizam a pipeline de deploy, reduzem erros e aumentam a confiança entre desenvolvimento e operações em projetos ágeis.",
        tags: ["CI/CD", "DevOps", "Agilidade"],
    },
    SeedArticle {
        title: "A Importância de Bancos de Dados NoSQL em Sistemas Escaláveis",
        author: "Carlos Eduardo",
        content: "Bancos NoSQL como MongoDB, Cassandra e DynamoDB armazenam grandes volumes de dados não estruturados e mantêm a disponibilidade sob alta demanda.",
        tags: ["NoSQL", "Bancos", "Escala"],
    },
    SeedArticle {
        title: "Como Kubernetes Revolucionou a Orquestração de Contêineres",
        author: "Geovana Rocha",
        content: "Kubernetes implanta, escala e gerencia aplicações em contêineres, automatizando balanceamento de carga e escalonamento com alta disponibilidade.",
        tags: ["Kubernetes", "Contêineres", "Orquestração"],
    },
    SeedArticle {
        title: "Os Desafios da Segurança em Arquiteturas Serverless",
        author: "Carlos Henrique",
        content: "Sem servidores para administrar, ainda é preciso proteger endpoints, gerenciar permissões e monitorar funções contra injeção de código e acessos indevidos.",
        tags: ["Serverless", "Segurança", "Cloud"],
    },
    SeedArticle {
        title: "Práticas de DevOps para Times Distribuídos",
        author: "Carlos Eduardo",
        content: "Docker, Kubernetes e Terraform garantem ambientes consistentes, enquanto a automação de tarefas rotineiras libera times distribuídos para o trabalho crítico.",
        tags: ["DevOps", "Colaboração", "Remoto"],
    },
    SeedArticle {
        title: "A Evolução do Desenvolvimento Frontend com Frameworks Modernos",
        author: "Geovana Rocha",
        content: "React, Angular e Vue.js trouxeram componentização e gerenciamento de estado, facilitando a manutenção e a escalabilidade de interfaces dinâmicas.",
        tags: ["Frontend", "Frameworks", "React"],
    },
    SeedArticle {
        title: "O Futuro do Agronegócio com a Grão Direto",
        author: "Fred Marques",
        content: "Aprendizado de máquina e análise preditiva ajudam a Grão Direto a otimizar transações e prever tendências de mercado no agronegócio brasileiro.",
        tags: ["Grão Direto", "Inovação", "Agronegócio"],
    },
];

/// (article index, author, content)
const COMMENTS: &[(usize, &str, &str)] = &[
    (0, "Carlos Henrique", "Excelente artigo! A Grão Direto realmente está revolucionando o agronegócio brasileiro."),
    (1, "Fred Marques", "Muito útil! Já estou implementando CI/CD no meu projeto seguindo essas práticas."),
    (2, "Geovana Rocha", "NoSQL realmente faz a diferença em aplicações que precisam de alta escalabilidade."),
    (3, "Carlos Eduardo", "Kubernetes mudou completamente a forma como trabalhamos com contêineres."),
    (4, "Geovana Rocha", "Segurança em serverless é realmente um tópico que merece atenção especial."),
    (5, "Fred Marques", "Times distribuídos são o futuro, e DevOps é essencial para isso funcionar."),
    (6, "Carlos Henrique", "React realmente transformou o desenvolvimento frontend. Excelente overview!"),
    (7, "Carlos Eduardo", "Parabéns pela visão sobre o futuro do agronegócio. A Grão Direto está no caminho certo!"),
];

/// (index into COMMENTS, author, content)
const REPLIES: &[(usize, &str, &str)] = &[
    (0, "Fred Marques", "Obrigado pelo feedback! Acreditamos que a tecnologia pode transformar o agronegócio."),
    (1, "Carlos Henrique", "Fico feliz em saber! Se tiver alguma dúvida durante a implementação, pode perguntar."),
];

fn email_for(name: &str) -> String {
    format!("{}@email.com", name.to_lowercase().replace(' ', "."))
}

fn data<T>(result: ApiResult<T>, what: &str) -> Result<T, Box<dyn Error>> {
    match result {
        ApiResult::Ok { data, .. } => Ok(data),
        ApiResult::Err { error, status_code } => {
            Err(format!("{what} failed ({status_code}): {error:?}").into())
        }
    }
}

fn id_of(ids: &[(&str, Uuid)], name: &str) -> Result<Uuid, Box<dyn Error>> {
    ids.iter()
        .find(|(n, _)| *n == name)
        .map(|(_, id)| *id)
        .ok_or_else(|| format!("unknown seed reference: {name}").into())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();

    let config = AppConfig::from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)))
        .init();

    let store = Arc::new(load_store(&config).await?);

    tracing::info!("Clearing existing data...");
    store.truncate_all().await?;

    let state = AppState::new(store.clone(), PasswordHasher::new(config.bcrypt_cost));

    tracing::info!("Creating users...");
    let mut users: Vec<(&str, Uuid)> = Vec::new();
    for article in ARTICLES {
        if users.iter().any(|(name, _)| *name == article.author) {
            continue;
        }
        let input = user_schema::validate_create(CreateUserRequest {
            name: Some(article.author.to_string()),
            email: Some(email_for(article.author)),
            password: Some(SEED_PASSWORD.to_string()),
            avatar: None,
        })?;
        let user = data(state.users.create(input).await, "create user")?;
        tracing::debug!("     {} - {}", user.name, user.email);
        users.push((article.author, user.id));
    }

    tracing::info!("Creating tags...");
    let mut tags: Vec<(&str, Uuid)> = Vec::new();
    for name in ARTICLES.iter().flat_map(|a| a.tags) {
        if tags.iter().any(|(n, _)| *n == name) {
            continue;
        }
        let name_input = tag_schema::validate_create(CreateTagRequest {
            name: Some(name.to_string()),
        })?;
        let tag = data(state.tags.create(name_input).await, "create tag")?;
        tracing::debug!("     {}", tag.name);
        tags.push((name, tag.id));
    }

    tracing::info!("Creating articles with their tags...");
    let mut article_ids = Vec::with_capacity(ARTICLES.len());
    for seed in ARTICLES {
        let tag_ids = seed
            .tags
            .iter()
            .map(|name| id_of(&tags, name).map(|id| id.to_string()))
            .collect::<Result<Vec<_>, _>>()?;

        let input = article_schema::validate_create(CreateArticleRequest {
            title: Some(seed.title.to_string()),
            content: Some(seed.content.to_string()),
            image: None,
            author_id: Some(id_of(&users, seed.author)?.to_string()),
            tag_ids: Some(tag_ids),
        })?;
        let article = data(state.articles.create(input).await, "create article")?;
        tracing::debug!("     {}", article.title);
        article_ids.push(article.id);
    }

    tracing::info!("Creating comments...");
    let mut comments = Vec::with_capacity(COMMENTS.len());
    for &(article_index, author, content) in COMMENTS {
        let article_id = *article_ids
            .get(article_index)
            .ok_or("comment references a missing article")?;
        let input = comment_schema::validate_create(CreateCommentRequest {
            content: Some(content.to_string()),
            article_id: Some(article_id.to_string()),
            user_id: Some(id_of(&users, author)?.to_string()),
            parent_id: None,
        })?;
        comments.push(data(state.comments.create(input).await, "create comment")?);
    }

    tracing::info!("Creating replies...");
    for &(comment_index, author, content) in REPLIES {
        let parent = comments
            .get(comment_index)
            .ok_or("reply references a missing comment")?;
        let input = comment_schema::validate_create(CreateCommentRequest {
            content: Some(content.to_string()),
            article_id: Some(parent.article_id.to_string()),
            user_id: Some(id_of(&users, author)?.to_string()),
            parent_id: Some(parent.id.to_string()),
        })?;
        data(state.comments.create(input).await, "create reply")?;
    }

    tracing::info!(
        users = users.len(),
        tags = tags.len(),
        articles = article_ids.len(),
        comments = comments.len() + REPLIES.len(),
        "Seed completed"
    );
    for (name, _) in &users {
        tracing::info!("   - {} ({}) - senha: {}", name, email_for(name), SEED_PASSWORD);
    }

    store.close().await;
    Ok(())
}
