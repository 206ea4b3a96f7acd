//! Task commands

use tabled::Tabled;

use cadence_tasks::{CreateTaskCommand, EntityId, Task, TaskUseCases};

use super::Context;
use crate::output::{label, or_dash, Field, OutputFormat};
use crate::TaskCommands;

#[derive(Tabled)]
struct TaskRow {
    id: String,
    title: String,
    due: String,
    status: String,
    priority: String,
    series: String,
}

impl From<&Task> for TaskRow {
    fn from(task: &Task) -> Self {
        let series = if task.is_recurring() {
            task.recurrence()
                .map(|p| format!("{} every {}", p.kind(), p.interval()))
                .unwrap_or_default()
        } else {
            or_dash(task.parent_task_id())
        };

        Self {
            id: task.id().to_string(),
            title: task.title().to_string(),
            due: or_dash(task.due_date()),
            status: label(&task.status()),
            priority: label(&task.priority()),
            series,
        }
    }
}

fn task_rows(tasks: &[Task]) -> Vec<TaskRow> {
    tasks.iter().map(TaskRow::from).collect()
}

fn task_fields(task: &Task) -> Vec<Field> {
    let mut fields = vec![
        Field::new("id", task.id()),
        Field::new("title", task.title()),
        Field::optional("description", task.description()),
        Field::optional("due", task.due_date()),
        Field::new("status", label(&task.status())),
        Field::new("priority", label(&task.priority())),
        Field::optional("project", task.project_id()),
        Field::optional("goal", task.goal_id()),
        Field::optional("parent", task.parent_task_id()),
    ];

    if let Some(policy) = task.recurrence() {
        fields.push(Field::new("repeat", format!("{} every {}", policy.kind(), policy.interval())));
        if !policy.weekdays().is_empty() {
            fields.push(Field::new("weekdays", policy.weekdays()));
        }
        fields.push(Field::optional("until", policy.end_date()));
        fields.push(Field::optional("limit", policy.occurrence_limit()));
        fields.push(Field::new("created", policy.occurrences_created()));
    }
    fields
}

pub async fn handle(action: TaskCommands, ctx: &Context, format: OutputFormat) -> anyhow::Result<()> {
    match action {
        TaskCommands::List => {
            let tasks = ctx.tasks.list_tasks().await?;
            format.print(&tasks, |t| task_rows(t))?;
        }
        TaskCommands::Get { id } => {
            let task = ctx.tasks.get_task(&EntityId::from_string(id)).await?;
            format.print(&task, task_fields)?;
        }
        TaskCommands::Create {
            title,
            description,
            priority,
            due,
            project,
            goal,
            repeat,
            recurrence,
        } => {
            let command = CreateTaskCommand {
                title,
                description,
                priority,
                due_date: due,
                project_id: project,
                goal_id: goal,
                recurrence: repeat.map(|kind| super::recur::spec(kind, &recurrence)),
            };
            let created = ctx.tasks.create_task(command).await?;
            ctx.persist()?;

            format.print(&created, |c| {
                let mut rows = vec![TaskRow::from(&c.task)];
                rows.extend(c.occurrences.iter().map(TaskRow::from));
                rows
            })?;
            if created.capped {
                eprintln!("warning: stopped at the safety cap; run `cadence task fill` to continue");
            }
        }
        TaskCommands::Next { id } => {
            match ctx.tasks.materialize_next(&EntityId::from_string(id)).await? {
                Some(occurrence) => {
                    ctx.persist()?;
                    format.print(&occurrence, |t| vec![TaskRow::from(t)])?;
                }
                None => format.message("Series is complete; no occurrence created")?,
            }
        }
        TaskCommands::Fill { id } => {
            let result = ctx.tasks.materialize_all(&EntityId::from_string(id)).await?;
            ctx.persist()?;
            format.print(&result, |r| task_rows(&r.occurrences))?;
            if result.capped {
                eprintln!("warning: stopped at the safety cap; run again to continue");
            }
        }
        TaskCommands::Advance { id, to } => {
            let result = ctx
                .tasks
                .advance(&EntityId::from_string(id), to.unwrap_or(ctx.today))
                .await?;
            ctx.persist()?;
            format.print(&result, |r| task_rows(&r.occurrences))?;
        }
        TaskCommands::Complete { id } => {
            let task = ctx.tasks.complete_task(&EntityId::from_string(id)).await?;
            ctx.persist()?;
            format.print(&task, |t| vec![TaskRow::from(t)])?;
        }
        TaskCommands::Occurrences { id } => {
            let occurrences = ctx.tasks.list_occurrences(&EntityId::from_string(id)).await?;
            format.print(&occurrences, |t| task_rows(t))?;
        }
        TaskCommands::DeleteSeries { id } => {
            let removed = ctx.tasks.delete_series(&EntityId::from_string(&*id)).await?;
            ctx.persist()?;
            format.message(&format!("Deleted series {id} ({removed} tasks)"))?;
        }
    }
    Ok(())
}
