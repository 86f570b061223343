mod common;

mod tests {
    use super::common::{MockTransport, RecordingSink};
    use pwm_pattern_composer::{
        CHANNEL_COUNT, ControlLoop, Controller, ControllerConfig, Duration, Instant, PatternMode,
        SharedController, Transport,
    };

    fn controller() -> Controller<RecordingSink> {
        Controller::new(RecordingSink::new(), &ControllerConfig::default())
    }

    #[test]
    fn test_response_is_mirrored_to_both_transports() {
        let mut controller = controller();
        let mut control = ControlLoop::new();
        let mut console = MockTransport::new("console");
        let mut radio = MockTransport::new("radio");
        radio.send("MODE:CONSTANT");

        let mut transports: [&mut dyn Transport; 2] = [&mut console, &mut radio];
        let result = control.poll(&mut controller, &mut transports, Instant::from_millis(0));

        assert_eq!(result.commands, 1);
        assert!(result.updated);
        assert_eq!(console.written, vec!["OK:MODE:CONSTANT"]);
        assert_eq!(radio.written, vec!["OK:MODE:CONSTANT"]);
        assert_eq!(controller.state().channel_duty(), &[128; CHANNEL_COUNT]);
    }

    #[test]
    fn test_one_line_per_transport_per_pass() {
        let mut controller = controller();
        let mut control = ControlLoop::new();
        let mut console = MockTransport::new("console");
        let mut radio = MockTransport::new("radio");
        console.send("INTENSITY:10");
        console.send("INTENSITY:20");
        radio.send("INTENSITY:30");

        {
            let mut transports: [&mut dyn Transport; 2] = [&mut console, &mut radio];
            let result = control.poll(&mut controller, &mut transports, Instant::from_millis(0));
            assert_eq!(result.commands, 2);
        }
        // Transports are served in slice order
        assert_eq!(controller.state().intensity(), 30);
        assert_eq!(console.written, vec!["OK:INTENSITY:10", "OK:INTENSITY:30"]);

        {
            let mut transports: [&mut dyn Transport; 2] = [&mut console, &mut radio];
            let result = control.poll(&mut controller, &mut transports, Instant::from_millis(1));
            assert_eq!(result.commands, 1);
        }
        assert_eq!(controller.state().intensity(), 20);
        assert_eq!(radio.written.last().map(String::as_str), Some("OK:INTENSITY:20"));
        assert_eq!(control.passes(), 2);
        assert_eq!(control.commands(), 3);
    }

    #[test]
    fn test_blank_lines_are_silent() {
        let mut controller = controller();
        let mut control = ControlLoop::new();
        let mut console = MockTransport::new("console");
        let mut radio = MockTransport::new("radio");
        console.send("   ");

        let mut transports: [&mut dyn Transport; 2] = [&mut console, &mut radio];
        let result = control.poll(&mut controller, &mut transports, Instant::from_millis(0));

        assert_eq!(result.commands, 0);
        assert!(console.written.is_empty());
        assert!(radio.written.is_empty());
    }

    #[test]
    fn test_command_runs_before_tick() {
        let mut controller = controller();
        let mut control = ControlLoop::new();
        let mut console = MockTransport::new("console");
        let mut radio = MockTransport::new("radio");
        console.send("MODE:WAVE");

        let mut transports: [&mut dyn Transport; 2] = [&mut console, &mut radio];
        let result = control.poll(&mut controller, &mut transports, Instant::from_millis(500));

        assert!(result.updated);
        assert_eq!(controller.state().wave_position(), 1);
        assert_eq!(
            result.next_wave_update,
            Some(Instant::from_millis(500) + Duration::from_millis(100))
        );
    }

    #[test]
    fn test_idle_pass_reports_no_schedule_outside_wave() {
        let mut controller = controller();
        let mut control = ControlLoop::new();
        let mut transports: [&mut dyn Transport; 0] = [];
        let result = control.poll(&mut controller, &mut transports, Instant::from_millis(0));
        assert_eq!(result.commands, 0);
        assert!(!result.updated);
        assert_eq!(result.next_wave_update, None);
    }

    #[test]
    fn test_shared_controller_serializes_access() {
        let shared = SharedController::new(RecordingSink::new(), &ControllerConfig::default());

        let response = shared.handle_line("MODE:CONSTANT").unwrap();
        assert_eq!(response.as_str(), "OK:MODE:CONSTANT");
        assert!(shared.tick(Instant::from_millis(0)));
        assert!(!shared.tick(Instant::from_millis(1)));

        shared.with(|controller| {
            assert_eq!(controller.state().mode(), PatternMode::Constant);
            assert_eq!(controller.sink().duty, [128; CHANNEL_COUNT]);
        });
    }

    #[test]
    fn test_shared_controller_across_threads() {
        use std::sync::Arc;

        let shared = Arc::new(SharedController::new(
            RecordingSink::new(),
            &ControllerConfig::default(),
        ));

        let commands = {
            let shared = Arc::clone(&shared);
            std::thread::spawn(move || {
                for n in 0..=255 {
                    shared.handle_line(&format!("INTENSITY:{n}"));
                }
                shared.handle_line("MODE:CONSTANT");
            })
        };
        let ticks = {
            let shared = Arc::clone(&shared);
            std::thread::spawn(move || {
                for now in 0..500 {
                    shared.tick(Instant::from_millis(now));
                }
            })
        };
        commands.join().unwrap();
        ticks.join().unwrap();

        shared.tick(Instant::from_millis(1_000));
        shared.with(|controller| {
            assert_eq!(controller.state().channel_duty(), &[255; CHANNEL_COUNT]);
        });
    }
}
