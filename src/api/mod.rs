pub mod assignments;
pub mod auth;
pub mod calendar;
pub mod courses;
pub mod messages;
pub mod roles;
pub mod subjects;
pub mod submissions;

use rocket::Route;

pub fn routes() -> Vec<Route> {
    routes![
        auth::api_register,
        auth::api_login,
        auth::api_logout,
        auth::api_me,
        auth::health,
        courses::api_list_courses,
        courses::api_create_course,
        courses::api_get_course,
        courses::api_update_course,
        courses::api_delete_course,
        subjects::api_list_subjects,
        subjects::api_create_subject,
        subjects::api_get_subject,
        subjects::api_update_subject,
        subjects::api_delete_subject,
        assignments::api_list_assignments,
        assignments::api_create_assignment,
        assignments::api_get_assignment,
        assignments::api_update_assignment,
        assignments::api_delete_assignment,
        submissions::api_list_submissions,
        submissions::api_create_submission,
        submissions::api_get_submission,
        submissions::api_update_submission,
        submissions::api_delete_submission,
        calendar::api_list_calendar_events,
        calendar::api_create_calendar_event,
        calendar::api_get_calendar_event,
        calendar::api_update_calendar_event,
        calendar::api_delete_calendar_event,
        messages::api_list_messages,
        messages::api_send_message,
        messages::api_get_conversation,
        messages::api_mark_message_read,
        messages::api_delete_message,
        roles::api_list_roles,
        roles::api_create_role,
        roles::api_assign_role,
        roles::api_remove_role,
    ]
}
