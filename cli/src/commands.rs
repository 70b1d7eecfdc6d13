//! Subcommand execution. Each command returns the text to print.

use tache_core::{LoginData, NewTask, RegisterData, TacheClient, Task, TaskUpdate};

use crate::Command;

pub async fn execute(client: &TacheClient, command: Command) -> tache_core::Result<String> {
    match command {
        Command::Register {
            username,
            email,
            password,
            bio,
        } => {
            let data = RegisterData {
                username,
                password,
                email,
                bio,
            };
            let auth = client.auth().register(&data).await?;
            Ok(format!("registered and logged in as {}", auth.user.username))
        }
        Command::Login { username, password } => {
            let auth = client.auth().login(&LoginData::new(username, password)).await?;
            Ok(format!("logged in as {}", auth.user.username))
        }
        Command::Logout => {
            client.auth().logout();
            Ok("logged out".to_string())
        }
        Command::Status => Ok(if client.auth().is_authenticated() {
            "logged in".to_string()
        } else {
            "not logged in".to_string()
        }),
        Command::List => {
            let tasks = client.tasks().list().await?;
            if tasks.is_empty() {
                return Ok("no tasks".to_string());
            }
            Ok(tasks.iter().map(render_line).collect::<Vec<_>>().join("\n"))
        }
        Command::Show { id } => Ok(render_detail(&client.tasks().get(id).await?)),
        Command::Add { title, description } => {
            let task = client.tasks().create(&NewTask::new(title, description)).await?;
            Ok(format!("created {}", render_line(&task)))
        }
        Command::Toggle { id } => {
            let task = client.tasks().get(id).await?;
            let task = client.tasks().toggle(&task).await?;
            Ok(render_line(&task))
        }
        Command::Edit {
            id,
            title,
            description,
        } => {
            let changes = TaskUpdate {
                title,
                description,
                complete: None,
            };
            if changes.is_empty() {
                return Err(tache_core::ApiError::Invalid(
                    "nothing to change: pass --title or --description".to_string(),
                ));
            }
            Ok(render_line(&client.tasks().update(id, &changes).await?))
        }
        Command::Rm { id } => {
            client.tasks().delete(id).await?;
            Ok(format!("deleted task {id}"))
        }
    }
}

fn marker(task: &Task) -> &'static str {
    if task.complete {
        "[x]"
    } else {
        "[ ]"
    }
}

fn render_line(task: &Task) -> String {
    format!("{} #{} {}", marker(task), task.id, task.title)
}

fn render_detail(task: &Task) -> String {
    let mut out = render_line(task);
    if !task.description.is_empty() {
        out.push_str("\n    ");
        out.push_str(&task.description);
    }
    out
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tache_core::{ApiError, FileStorage};

    use super::*;

    fn task(complete: bool, description: &str) -> Task {
        Task {
            id: 4,
            title: "Courses".to_string(),
            description: description.to_string(),
            complete,
        }
    }

    #[test]
    fn line_shows_completion_marker() {
        assert_eq!(render_line(&task(false, "")), "[ ] #4 Courses");
        assert_eq!(render_line(&task(true, "")), "[x] #4 Courses");
    }

    #[test]
    fn detail_includes_description() {
        assert_eq!(render_detail(&task(false, "")), "[ ] #4 Courses");
        assert_eq!(render_detail(&task(true, "lait")), "[x] #4 Courses\n    lait");
    }

    async fn spawn_client(dir: &std::path::Path) -> TacheClient {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { mock_server::run(listener).await });
        TacheClient::new(&format!("http://{addr}/api"), Arc::new(FileStorage::new(dir))).unwrap()
    }

    #[tokio::test]
    async fn session_flow_through_commands() {
        let dir = tempfile::tempdir().unwrap();
        let client = spawn_client(dir.path()).await;

        let out = execute(&client, Command::Status).await.unwrap();
        assert_eq!(out, "not logged in");
        let err = execute(&client, Command::List).await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated));

        let out = execute(
            &client,
            Command::Register {
                username: "ana".to_string(),
                email: "ana@test.fr".to_string(),
                password: "pw".to_string(),
                bio: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(out, "registered and logged in as ana");
        assert_eq!(execute(&client, Command::List).await.unwrap(), "no tasks");

        let out = execute(
            &client,
            Command::Add {
                title: "Courses".to_string(),
                description: String::new(),
            },
        )
        .await
        .unwrap();
        assert_eq!(out, "created [ ] #1 Courses");

        let out = execute(&client, Command::Toggle { id: 1 }).await.unwrap();
        assert_eq!(out, "[x] #1 Courses");
        assert_eq!(execute(&client, Command::List).await.unwrap(), "[x] #1 Courses");

        let err = execute(
            &client,
            Command::Edit {
                id: 1,
                title: None,
                description: None,
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::Invalid(_)));

        assert_eq!(execute(&client, Command::Rm { id: 1 }).await.unwrap(), "deleted task 1");
        let err = execute(&client, Command::Show { id: 1 }).await.unwrap_err();
        assert_eq!(err.to_string(), "Tâche introuvable");

        assert_eq!(execute(&client, Command::Logout).await.unwrap(), "logged out");
        assert_eq!(execute(&client, Command::Status).await.unwrap(), "not logged in");
    }
}
