//! Synthetic data generator. A pure HTTP client of the public API surface:
//! registers tutors, logs them in, and populates students and sessions
//! through the same endpoints real clients use.

use anyhow::{bail, Context, Result};
use chrono::{Duration, Utc};
use clap::Parser;
use rand::seq::SliceRandom;
use rand::Rng;
use serde_json::{json, Value};

const FIRST_NAMES: &[&str] = &[
    "Ava", "Ben", "Chloe", "Daniel", "Emma", "Felix", "Grace", "Henry", "Isla", "Jonas", "Kara",
    "Liam", "Mia", "Noah", "Olive", "Priya", "Quentin", "Rosa", "Sam", "Tara",
];

const TOPICS: &[&str] = &[
    "algebra",
    "geometry",
    "calculus",
    "statistics",
    "physics",
    "chemistry",
    "essay writing",
    "reading comprehension",
    "french",
    "spanish",
];

const DURATIONS: &[i64] = &[30, 45, 60, 90];

#[derive(Debug, Parser)]
#[command(name = "seed", about = "Populate a running tutoring API with synthetic data")]
struct Args {
    /// Base URL of a running server
    #[arg(long, default_value = "http://127.0.0.1:8000")]
    base_url: String,

    /// Number of tutor accounts to register
    #[arg(long, default_value_t = 5)]
    tutors: usize,

    /// Students created per tutor
    #[arg(long, default_value_t = 4)]
    students_per_tutor: usize,

    /// Sessions logged per tutor
    #[arg(long, default_value_t = 3)]
    sessions_per_tutor: usize,

    /// Password shared by every generated account
    #[arg(long, default_value = "pw123")]
    password: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let client = reqwest::Client::new();
    let mut rng = rand::thread_rng();

    let mut total_students = 0usize;
    let mut total_sessions = 0usize;

    for _ in 0..args.tutors {
        // Random suffix keeps reruns against the same database conflict-free
        let suffix: u32 = rng.gen_range(0..1_000_000);
        let username = format!("tutor{:06}", suffix);
        let email = format!("{}@example.com", username);

        let registered: Value = post_json(
            &client,
            &format!("{}/register/", args.base_url),
            &json!({ "username": username, "email": email, "password": args.password }),
        )
        .await
        .with_context(|| format!("registering {}", username))?;
        let user_id = registered["user_id"]
            .as_str()
            .context("register response missing user_id")?
            .to_string();

        let token = login(&client, &args.base_url, &username, &args.password).await?;

        let mut student_ids = Vec::new();
        for _ in 0..args.students_per_tutor {
            let name = FIRST_NAMES.choose(&mut rng).unwrap();
            let student: Value = post_json_auth(
                &client,
                &format!("{}/students/", args.base_url),
                &token,
                &json!({
                    "name": name,
                    "email": format!("{}.{}@example.com", name.to_lowercase(), rng.gen_range(0..10_000)),
                    "age": rng.gen_range(14..=50),
                }),
            )
            .await
            .with_context(|| format!("creating student for {}", username))?;
            student_ids.push(
                student["id"]
                    .as_str()
                    .context("student response missing id")?
                    .to_string(),
            );
            total_students += 1;
        }

        for _ in 0..args.sessions_per_tutor {
            let student_id = student_ids.choose(&mut rng).unwrap();
            let date = Utc::now() - Duration::days(rng.gen_range(0..60));
            post_json_auth(
                &client,
                &format!("{}/sessions/", args.base_url),
                &token,
                &json!({
                    "student_id": student_id,
                    "date": date.to_rfc3339(),
                    "duration": DURATIONS.choose(&mut rng).unwrap(),
                    "topic": TOPICS.choose(&mut rng).unwrap(),
                }),
            )
            .await
            .with_context(|| format!("logging session for {}", username))?;
            total_sessions += 1;
        }

        println!(
            "seeded tutor {} (user {}) with {} students",
            username,
            user_id,
            student_ids.len()
        );
    }

    println!(
        "done: {} tutors, {} students, {} sessions",
        args.tutors, total_students, total_sessions
    );
    Ok(())
}

async fn login(
    client: &reqwest::Client,
    base_url: &str,
    username: &str,
    password: &str,
) -> Result<String> {
    let response = client
        .post(format!("{}/token/", base_url))
        .form(&[("username", username), ("password", password)])
        .send()
        .await?;
    if !response.status().is_success() {
        bail!("login for {} failed with {}", username, response.status());
    }
    let body: Value = response.json().await?;
    body["access_token"]
        .as_str()
        .map(str::to_string)
        .context("token response missing access_token")
}

async fn post_json(client: &reqwest::Client, url: &str, body: &Value) -> Result<Value> {
    let response = client.post(url).json(body).send().await?;
    if !response.status().is_success() {
        bail!("POST {} failed with {}", url, response.status());
    }
    Ok(response.json().await?)
}

async fn post_json_auth(
    client: &reqwest::Client,
    url: &str,
    token: &str,
    body: &Value,
) -> Result<Value> {
    let response = client
        .post(url)
        .bearer_auth(token)
        .json(body)
        .send()
        .await?;
    if !response.status().is_success() {
        bail!("POST {} failed with {}", url, response.status());
    }
    Ok(response.json().await?)
}
