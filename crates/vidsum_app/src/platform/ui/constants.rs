pub const PROMPT: &str = "vidsum> ";

pub const HELP_TEXT: &str = "\
Commands:
  submit <url>        summarize a video (a bare YouTube URL works too)
  submit              resubmit the current input
  upscale             upscale the thumbnail 2x
  menu | menu close   open or close the upscale menu
  pick 2x|4k|8k       choose an upscale option
  toggle              switch between original and upscaled image
  view | close        open or close the full-size viewer
  tab en|hi           show the English or Hindi summary
  download            save the current image to the output directory
  dismiss             clear the notification
  help                show this text
  quit                exit";
