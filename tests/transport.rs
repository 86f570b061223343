mod common;

mod tests {
    use super::common::RecordingSink;
    use pwm_pattern_composer::channel::{TryReceiveError, TrySendError};
    use pwm_pattern_composer::{
        ControlLoop, Controller, ControllerConfig, Instant, Line, LineAssembler, LineChannel,
        QueuedTransport, ResponseChannel, Transport,
    };

    fn feed<const N: usize>(assembler: &mut LineAssembler<N>, bytes: &[u8]) -> Vec<String> {
        bytes
            .iter()
            .filter_map(|byte| assembler.push(*byte))
            .map(|line| line.as_str().to_string())
            .collect()
    }

    fn line(text: &str) -> Line {
        let mut line = Line::new();
        line.push_str(text).unwrap();
        line
    }

    #[test]
    fn test_assembler_splits_lines() {
        let mut assembler = LineAssembler::<16>::new();
        let lines = feed(&mut assembler, b"MODE:WAVE\r\nSTATUS\nSPEED:");
        assert_eq!(lines, vec!["MODE:WAVE", "STATUS"]);
        assert_eq!(assembler.pending(), 6);
        assert_eq!(feed(&mut assembler, b"50\n"), vec!["SPEED:50"]);
    }

    #[test]
    fn test_assembler_delivers_empty_lines() {
        let mut assembler = LineAssembler::<16>::new();
        assert_eq!(feed(&mut assembler, b"\r\n\n"), vec!["", ""]);
    }

    #[test]
    fn test_assembler_drops_overlong_line() {
        let mut assembler = LineAssembler::<8>::new();
        let lines = feed(&mut assembler, b"INTENSITY:200\nSTATUS\n");
        assert_eq!(lines, vec!["STATUS"]);
    }

    #[test]
    fn test_assembler_replaces_non_ascii() {
        let mut assembler = LineAssembler::<16>::new();
        let lines = feed(&mut assembler, &[b'A', 0xC3, 0xA9, b'B', b'\n']);
        assert_eq!(lines, vec!["A??B"]);
    }

    #[test]
    fn test_channel_is_bounded_fifo() {
        let channel = LineChannel::<2>::new();
        assert!(channel.is_empty());
        channel.try_send(line("A")).unwrap();
        channel.try_send(line("B")).unwrap();
        assert_eq!(channel.try_send(line("C")), Err(TrySendError(line("C"))));
        assert_eq!(channel.len(), 2);

        assert_eq!(channel.try_receive().unwrap().as_str(), "A");
        assert_eq!(channel.try_receive().unwrap().as_str(), "B");
        assert_eq!(channel.try_receive(), Err(TryReceiveError));
    }

    #[test]
    fn test_channel_handles_share_one_queue() {
        let channel = LineChannel::<4>::new();
        let uart = channel.sender();
        let radio = channel.sender();
        let receiver = channel.receiver();
        assert!(receiver.is_empty());

        uart.try_send(line("MODE:WAVE")).unwrap();
        radio.try_send(line("STATUS")).unwrap();
        assert_eq!(channel.len(), 2);

        assert_eq!(receiver.try_receive().unwrap().as_str(), "MODE:WAVE");
        assert_eq!(receiver.try_receive().unwrap().as_str(), "STATUS");
        assert!(receiver.is_empty());
        assert_eq!(receiver.try_receive(), Err(TryReceiveError));
    }

    #[test]
    fn test_queued_transport_round_trip() {
        let lines = LineChannel::<4>::new();
        let responses = ResponseChannel::<4>::new();
        let mut radio = QueuedTransport::new("radio", lines.receiver(), responses.sender());
        assert_eq!(radio.name(), "radio");
        assert!(radio.poll_line().is_none());

        // Receive interrupt side
        let mut assembler = LineAssembler::<64>::new();
        for byte in b"intensity:99\n" {
            if let Some(complete) = assembler.push(*byte) {
                lines.sender().try_send(complete).unwrap();
            }
        }

        let mut controller = Controller::new(RecordingSink::new(), &ControllerConfig::default());
        let mut control = ControlLoop::new();
        let mut transports: [&mut dyn Transport; 1] = [&mut radio];
        let result = control.poll(&mut controller, &mut transports, Instant::from_millis(0));

        assert_eq!(result.commands, 1);
        assert_eq!(controller.state().intensity(), 99);
        assert_eq!(responses.try_receive().unwrap().as_str(), "OK:INTENSITY:99");
        assert!(responses.is_empty());
    }

    #[test]
    fn test_queued_transport_drops_when_response_queue_full() {
        let lines = LineChannel::<1>::new();
        let responses = ResponseChannel::<1>::new();
        let mut console = QueuedTransport::new("console", lines.receiver(), responses.sender());

        console.write_line("OK:MODE:WAVE");
        console.write_line("OK:MODE:STOP");

        assert_eq!(responses.len(), 1);
        assert_eq!(responses.try_receive().unwrap().as_str(), "OK:MODE:WAVE");
    }
}
