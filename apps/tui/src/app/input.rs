use crossterm::event::KeyCode;

use super::App;

pub fn handle_input(app: &mut App, key: KeyCode) {
    if app.show_help {
        // Any key closes the help popup
        app.show_help = false;
        return;
    }

    match key {
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        KeyCode::Char('r') => app.request_refresh(),
        KeyCode::Char('?') => app.toggle_help(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quit_keys_stop_the_app() {
        let mut app = App::new("url");
        handle_input(&mut app, KeyCode::Char('q'));
        assert!(!app.running);

        let mut app = App::new("url");
        handle_input(&mut app, KeyCode::Esc);
        assert!(!app.running);
    }

    #[test]
    fn refresh_key_requests_a_fetch() {
        let mut app = App::new("url");
        app.take_refresh_request();
        app.loading = false;
        handle_input(&mut app, KeyCode::Char('r'));
        assert!(app.take_refresh_request());
    }

    #[test]
    fn help_popup_swallows_next_key() {
        let mut app = App::new("url");
        handle_input(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        handle_input(&mut app, KeyCode::Char('q'));
        assert!(!app.show_help);
        assert!(app.running);
    }
}
