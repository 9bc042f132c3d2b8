//! Built-in markup templates
//!
//! Names end in `.textile` so Tera leaves autoescaping off; the output is
//! wiki markup with inline HTML, not an HTML document.

pub const RELEASE_METRICS: &str = "release_metrics.textile";
pub const ITERATION_BURNDOWN: &str = "iteration_burndown.textile";
pub const WHAT_IF: &str = "what_if.textile";
pub const ERROR: &str = "error.textile";

pub const ALL: [(&str, &str); 4] = [
    (RELEASE_METRICS, RELEASE_METRICS_TEMPLATE),
    (ITERATION_BURNDOWN, ITERATION_BURNDOWN_TEMPLATE),
    (WHAT_IF, WHAT_IF_TEMPLATE),
    (ERROR, ERROR_TEMPLATE),
];

pub const ERROR_TEMPLATE: &str = r#"h2. {{ title }}:

"An Error occurred: {{ message }}"
"#;

pub const RELEASE_METRICS_TEMPLATE: &str = r#"h2. Metrics for {{ release }}

|_. Current Iteration | {{ iteration }} |_. %{color:#EEEEEE}-% |_. Estimated Completion <br> of {{ release }} <br> Based on ... |_. Required <br> Iterations |_. Calculated End Date <br> Based on {{ iteration_length }} Day Iterations |
|_. Average Velocity <br> (last 3 iterations) | {{ recent.velocity }} |_. %{color:#EEEEEE}-% | Average velocity of <br> last 3 iterations ({{ recent.velocity }}) | {{ recent.iterations }} | {{ recent.end_date }} |
|_. Completed Iterations | {{ completed_iterations }} |_. %{color:#EEEEEE}-% | Average velocity of <br> all iterations ({{ overall.velocity }}) | {{ overall.iterations }} | {{ overall.end_date }} |
|_. Remaining Story Points <br> (includes all stories not <br> in a past iteration) | {{ remaining_story_points }} |_. %{color:#EEEEEE}-% | Best velocity ({{ best.velocity }}) | {{ best.iterations }} | {{ best.end_date }} |
|_. Iteration Length <br> (calculated based on <br> last iteration completed) | {{ iteration_length }} days |_. %{color:#EEEEEE}-% | Worst velocity ({{ worst.velocity }}) | {{ worst.iterations }} | {{ worst.end_date }} |

<br>
"#;

pub const ITERATION_BURNDOWN_TEMPLATE: &str = r#"h2. Iteration #{{ number }} Burndown:

weekdays = {{ weekdays }} <br>
total story points {{ total_points }} <br>
remaining story points {{ remaining_points }} <br>

<img src='{{ chart_url }}'></img>
"#;

pub const WHAT_IF_TEMPLATE: &str = r##"h2. What-If Calculator

|_. Remaining story point |_. Days/Iteration |_. Velocity |_. Calculated End Date |
| {{ remaining_story_points }} | {{ iteration_length }} | <input type='text' id='what-if-velocity'{% if velocity %} value='{{ velocity }}'{% endif %}></input> | <input type='text' id="date-calc" value='{% if projected_end_date %}{{ projected_end_date }}{% else %}Enter a velocity to see expected end date.{% endif %}'></input> |

<span id='debug-info'></span>

<script type="text/javascript" src="http://ajax.googleapis.com/ajax/libs/jquery/1.6.1/jquery.min.js"></script>
<script type="text/javascript">
  jQuery.noConflict();
  MingleJavascript.register(function initialize() {
    try {
      var lastIterEndDate = new Date('{{ last_iteration_end_date }}'),
          daysInIter = {{ iteration_length }},
          remainingStoryPoints = {{ remaining_story_points }};

      var remainingIterations = function(velocity, remainingPoints) {
        return remainingPoints / velocity;
      };

      var expectedCompletionDateFor = function(lastEnd, days, iterations) {
        return new Date(lastEnd.getTime() + (1000 * 60 * 60 * 24 * (days * iterations)));
      };

      var dateCalcOut = jQuery("#date-calc");

      jQuery("#what-if-velocity").blur(function() {
        var velocity = parseInt(jQuery("#what-if-velocity").val());
        var iterations = remainingIterations(velocity, remainingStoryPoints);
        var expectedDate = expectedCompletionDateFor(lastIterEndDate, daysInIter, iterations);
        dateCalcOut.val(expectedDate.getFullYear() + '-' + (expectedDate.getMonth() + 1) + '-' + expectedDate.getDate());
      });
    } catch (err) {
      jQuery("#date-calc").val(err);
    }
  });
</script>
"##;
