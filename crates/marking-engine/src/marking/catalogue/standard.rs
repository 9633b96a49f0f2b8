use super::super::domain::UnitId;
use super::{BandTable, Catalogue, MarkTable, PresentationCriterion, UnitRubric};

const PRESENTATION_CRITERIA: [(&str, &str); 11] = [
    (
        "excellent",
        "The overall presentation is excellent/perfect.",
    ),
    (
        "medium_signposts",
        "Some signposts are not clear, such as multi-level headings, indents, dot points, bolding, etc.",
    ),
    (
        "medium_font",
        "The use of font (spacing, margins, etc.) is not consistent across labs.",
    ),
    ("medium_grammar", "Many spelling and grammar mistakes."),
    (
        "medium_screenshots",
        "Some screenshots/pictures are not clear.",
    ),
    (
        "medium_formatting",
        "Some code, commands and/or variables are not well formatted to distinguish themselves from texts.",
    ),
    ("bad_not_pdf", "The submitted file is NOT a PDF."),
    (
        "bad_no_template",
        "The submitted file didn't follow(or use) the provided markdown file as its template (e.g. the cover sheet should be a separate page).",
    ),
    (
        "bad_too_long",
        "The submitted file has more than 80 pages in total.",
    ),
    (
        "bad_filename",
        "The submitted file name does NOT follow the format of studentid_firstname_labs1_5.pdf",
    ),
    (
        "bad_structure",
        "The submitted file has a poorly/unstructured structure, e.g., no headings, blurring screenshots/pictures.",
    ),
];

const LAB_1: &[&str] = &[
    "Evidence of a working environment is missing",
    "Explanations of used commands in installing Linux packages are missing/insufficient",
    "Explanations of used commands in testing the installed environment are missing",
    "The code to tabulate the print-based output has not been completed",
    "The code to tabulate the print-based output has little explanation",
];

const LAB_2: &[&str] = &[
    "The explanation of the commands used to create an ec2 instance using AWS CLI is too short",
    "The code to create an ec2 instance has little explanation",
    "The code to create an EC2 instance is missing",
    "The instance name does NOT start with a student number",
    "The instance type is not t3.micro",
    "The code to Build and run an httpd container has little explanation",
    "The explanation of the docker commands is too short",
    "Evidence of getting 'Hello World!' is missing",
    "Evidence of listing the created instance via the console is missing",
    "Explanations of manual instance termination are missing",
];

const LAB_3: &[&str] = &[
    "Explanations of commands used to prepare files and directories are missing",
    "The bucket name does not follow the format of student ID-cloudstorage",
    "The code used to save to S3 is missing",
    "The S3 bucket has an incorrect layout of objects",
    "The code used to restore from S3 is missing",
    "Explanations of code used to save to S3 are missing",
    "Explanations of code used to restore from S3 are missing",
    "The code used to write attributes of each file in the S3 bucket into the CloudFiles table is missing",
    "Explanations of code used to write attributes of each file in the S3 bucket into the CloudFiles table are missing",
    "The DynamoDB should be created locally (not on AWS)",
    "Some retrieved attributes shown in the CloudFiles table are not correct",
];

const LAB_4: &[&str] = &[
    "The code used to apply a policy to restrict permission on bucket is missing",
    "Explanations of commands used to apply a policy to restrict permission on bucket are missing",
    "The template resource should be instantiated via your own S3 bucket",
    "Screenshots/outputs for the policy check are missing",
    "The code used to create a KMS key is missing",
    "Explanations of code used to create a KMS key are missing",
    "The code used to attach a policy to the created KMS key is missing",
    "Explanations of code used to attach a policy to the created KMS key are missing",
    "Screenshots/outputs for the key check are missing",
    "The code used to use the KMS key is missing",
    "Explanations of code used to use the KMS key are missing",
    "The code used to use the pycryptodome for encryption/decryption is missing",
    "Explanations of code used to use the pycryptodome for encryption/decryption are missing",
    "The answer to the question is not valid",
];

const LAB_5: &[&str] = &[
    "The two EC2 instances must be created in two different availability zones",
    "You should attach your evidence of creating 2 instances",
    "The instance name does NOT start with a student number",
    "The instance type is not t3.micro",
    "The code used to create an application load balancer is missing",
    "Explanations of code used to create an application load balancer are missing",
    "Explanations of commands used to test the application load balancer are missing",
    "The Apache web page does NOT show the correct instance name",
    "Explanations of manual instance termination are missing",
];

const LAB_6: &[&str] = &[
    "No screenshot/description of creating an EC2 (NOTE: students can use script or console)",
    "The EC2 instance type is not t3.micro",
    "No screenshot/description of creating a directory with a path, and cd into the directory",
    "The explanations of commands in installing python3 virtual environment packages are missing",
    "The explanations of commands in setting a python3 virtual environment are missing",
    "The explanations of commands in activating a python3 virtual environment are missing",
    "No description of the file contents of /etc/nginx/sites-enabled/default",
    "No screenshot/description of restarting nginx",
    "No screenshot of accessing the instance's IP address after restarting the web server",
    "No description of polls/views.py or /urls.py or lab/urls.py edited to set up django",
    "No screenshot of accessing the specific URL after restarting the web server",
    "No screenshot/description of creating an application load balancer (NOTE: students can use script or console)",
    "No screenshot/description of health check (NOTE: Django server showing requests or AWS console showing healthy status is sufficient)",
    "No screenshot/description of accessing the specific URL after health check",
    "No screenshot/description of creating an AWS DynamoDB table (NOTE: students can use script or console)",
    "No explanation of the given TEMPLATES section",
    "No explanation of the given files.html",
    "No explanation of the given views.py",
    "No screenshot/description of running a Django application",
    "No screenshot of accessing the web page",
    "No screenshot/description of deleting the instance",
    "No screenshot/description of deleting the load balancer",
    "No screenshot/description of deleting the AWS DynamoDB table",
];

const LAB_7: &[&str] = &[
    "No screenshot/description of creating an EC2 instance (NOTE: students can use script or console)",
    "The EC2 instance type is not t3.micro",
    "No screenshot/description of installing fabric",
    "No explanation of the config file",
    "No explanation of the fabric code that connects with the instance",
    "In fabric for automation, no description of code in installing/setting/activating the Python 3 virtual environment",
    "In fabric for automation, no description of code in installing/configuring/restarting nginx",
    "In fabric for automation, no description of code in creating and setting up django inside the created EC2 instance",
    "No screenshot/description of the url access in the end",
    "No screenshot/description of deleting the instance",
];

const LAB_8: &[&str] = &[
    "No explanation of the Dockerfile",
    "No screenshot/description of testing the image",
    "No explanation of the script that creates an ECR repository",
    "No explanation of the script that gets the Docker token",
    "No screenshot/description of explaining or running the output command",
    "No explanation of the tagging or pushing commands",
    "No screenshot/description of pushing the local Docker image onto ECR successfully",
    "No explanation of the script that creates a task definition for an ECS task",
    "No explanation of the script that creates an ECS service",
    "No screenshot/description of creating the ECS service successfully",
    "No explanation of the command that gets a public IP address",
    "No explanation of the three installed libraries",
    "No explanation of code in preparing a SageMaker session",
    "No explanation of commands used in downloading or unzipping the dataset",
    "No or incorrect answer to the first question (Answer: job, marital, education, default, housing, loan, contact, month, day_of_week, poutcome)",
    "No or incorrect answer to the second question (Answer: age, duration, campaign, pdays, previous, emp.var.rate, cons.price.idx, cons.conf.idx, euribor3m, nr.employed)",
    "The explanation of code in reading the dataset into Pandas data frame is missing",
    "The explanation of code in processing the data is missing",
    "The explanation of code in removing the economic features and duration is missing",
    "The explanation of code in splitting the data is missing",
    "The explanation of code in copying the file to the S3 bucket is missing",
    "The explanation of code in setting up hyperparameter tuning is missing",
    "The explanation of code in specifying the XGBoost algorithm is missing",
    "No screenshot/description of launching hyperparameter tuning job",
    "No screenshot of the success of completing the tuning job",
    "No screenshot/description of deleting the S3 bucket",
    "No screenshot/description of deleting the ECR repository",
    "No screenshot/description of deleting the ECS service",
];

const LAB_9: &[&str] = &[
    "The code in detecting 4 different languages from text is missing",
    "The explanation of the code in detecting 4 different languages from text is missing",
    "The code in analyzing sentiment is missing",
    "The explanation of the code in analyzing sentiment is missing",
    "The code in detecting entities is missing",
    "The explanation of the code in detecting entities is missing",
    "No or incorrect answer to the question of describing what entities are",
    "The code in detecting keyphrases is missing",
    "The explanation of the code in detecting keyphrases is missing",
    "No or incorrect answer to the question of describing what keyphrases are",
    "The code in detecting syntaxes is missing",
    "The explanation of the code in detecting syntaxes is missing",
    "No or incorrect answer to the question of describing what syntaxes are",
    "The code of creating a S3 bucket and adding 4 images to the S3 bucket is missing",
    "The explanation of the code in label recognition is missing",
    "The explanation of the code in image moderation is missing",
    "The explanation of the code in facial analysis is missing",
    "The explanation of the code in text extraction is missing",
];

fn standard_lab_marks() -> MarkTable {
    MarkTable::four_tier(1.7, 1.3, 0.9, 0.5)
}

// Labs 8 and 9 carry one and a half times the weight of the others.
fn weighted_lab_marks() -> MarkTable {
    MarkTable::four_tier(2.55, 1.95, 1.35, 0.75)
}

fn lab(
    number: u8,
    deficiencies: &[&'static str],
    bad_threshold: usize,
    bands: BandTable,
    marks: MarkTable,
) -> UnitRubric {
    UnitRubric {
        id: UnitId(number),
        deficiencies: deficiencies.to_vec(),
        bad_threshold,
        bands,
        marks,
    }
}

pub(super) fn presentation_criteria() -> Vec<PresentationCriterion> {
    PRESENTATION_CRITERIA
        .iter()
        .map(|&(id, description)| PresentationCriterion { id, description })
        .collect()
}

pub(super) fn presentation_marks() -> MarkTable {
    MarkTable::presentation(1.5, 0.8, 0.3)
}

pub(super) fn units() -> Vec<UnitRubric> {
    vec![
        lab(1, LAB_1, 4, BandTable::split(2), standard_lab_marks()),
        lab(2, LAB_2, 8, BandTable::split(4), standard_lab_marks()),
        lab(3, LAB_3, 9, BandTable::split(4), standard_lab_marks()),
        lab(4, LAB_4, 12, BandTable::split(4), standard_lab_marks()),
        lab(5, LAB_5, 7, BandTable::split(4), standard_lab_marks()),
        lab(6, LAB_6, 17, BandTable::graded(2, 10, 16), standard_lab_marks()),
        lab(7, LAB_7, 7, BandTable::graded(1, 3, 6), standard_lab_marks()),
        lab(8, LAB_8, 21, BandTable::graded(2, 10, 20), weighted_lab_marks()),
        lab(9, LAB_9, 13, BandTable::graded(2, 8, 12), weighted_lab_marks()),
    ]
}

pub(super) fn catalogue() -> Catalogue {
    Catalogue::new(presentation_criteria(), presentation_marks(), units())
        .expect("standard rubric satisfies catalogue validation")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalogue_passes_validation() {
        let validated = Catalogue::new(presentation_criteria(), presentation_marks(), units());
        assert!(validated.is_ok(), "{validated:?}");
        assert_eq!(Catalogue::standard().units().len(), 9);
    }

    #[test]
    fn lab_sizes_match_rubric() {
        let sizes: Vec<(usize, usize)> = units()
            .iter()
            .map(|unit| (unit.deficiencies.len(), unit.bad_threshold))
            .collect();
        assert_eq!(
            sizes,
            vec![
                (5, 4),
                (10, 8),
                (11, 9),
                (14, 12),
                (9, 7),
                (23, 17),
                (10, 7),
                (28, 21),
                (18, 13)
            ]
        );
    }
}
