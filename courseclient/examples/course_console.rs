use anyhow::{Result, anyhow};
use courseclient::{CourseFilter, CourseServiceClient, logging::init_logging};
use std::env;

fn usage() -> anyhow::Error {
    anyhow!(
        "usage: course_console <list | get ID | delete ID | students COURSE_ID | schedules COURSE_ID | search FILIERE [NIVEAU]>"
    )
}

fn id_arg(args: &[String], idx: usize) -> Result<i64> {
    args.get(idx)
        .ok_or_else(usage)?
        .parse::<i64>()
        .map_err(|e| anyhow!("invalid id {:?}: {}", args[idx], e))
}

fn main() -> Result<()> {
    let config = courseconfig::get_config();
    init_logging(&config)?;

    let client = CourseServiceClient::from_config(&config);
    println!("Endpoint: {}", client.transport().endpoint());

    // Args:
    //   course_console list
    //   course_console get 2
    //   course_console search INFO L3
    let args: Vec<String> = env::args().collect();
    let command = args.get(1).map(String::as_str).unwrap_or("list");

    let output = match command {
        "list" => serde_json::to_string_pretty(&client.get_all_courses()?)?,
        "get" => match client.get_course(id_arg(&args, 2)?)? {
            Some(course) => serde_json::to_string_pretty(&course)?,
            None => "No such course".to_string(),
        },
        "delete" => client.delete_course(id_arg(&args, 2)?)?,
        "students" => serde_json::to_string_pretty(&client.enrolled_student_ids(id_arg(&args, 2)?)?)?,
        "schedules" => serde_json::to_string_pretty(&client.get_schedules(id_arg(&args, 2)?)?)?,
        "search" => {
            let filter = CourseFilter {
                filiere: args.get(2).cloned(),
                niveau: args.get(3).cloned(),
                ..Default::default()
            };
            serde_json::to_string_pretty(&client.list_courses_filtered(&filter)?)?
        }
        _ => return Err(usage()),
    };

    println!("{}", output);
    Ok(())
}
